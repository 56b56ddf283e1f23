//! Hash-based route resolution.
//!
//! Design principle: route resolution is a pure function over the hash
//! string and the guard verdict. Side effects (nav markers, module loading)
//! live in the application layer.

mod module_id;
mod route;

pub use module_id::ModuleId;
pub use route::{decide, resolve_route, Route, RouteDecision};
