//! ID type wrappers for type safety.

mod id_macro;
mod task_id;

use id_macro::impl_id;
use serde::{Deserialize, Serialize};

pub use task_id::TaskId;

/// Stable identifier of a note list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListId(String);

/// Identifier of an authenticated user, as issued by the auth worker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl_id!(ListId, UserId);
