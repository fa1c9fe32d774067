pub mod commands;
pub mod events;
pub mod types;

pub use commands::Command;
pub use events::Reply;
pub use types::ErrorPayload;
