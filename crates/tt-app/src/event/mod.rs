mod app_event;

pub use app_event::{SessionEvent, SessionEvents};
