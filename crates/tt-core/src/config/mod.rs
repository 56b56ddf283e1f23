mod model;

pub use model::TerminalConfig;
