//! Ports: the traits the application layer composes and the
//! infrastructure layer implements.

mod clock;
mod container;
mod key_value;
mod module_assets;
mod module_behavior;
mod notes_cipher;
mod notes_remote;
mod notes_view;
mod script_host;

pub use clock::ClockPort;
pub use container::ContainerPort;
pub use key_value::KeyValueStorePort;
pub use module_assets::{AssetError, ModuleAssetPort};
pub use module_behavior::ModuleBehaviorPort;
pub use notes_cipher::NotesCipherPort;
pub use notes_remote::NotesRemotePort;
pub use notes_view::NotesViewPort;
pub use script_host::ScriptHostPort;
