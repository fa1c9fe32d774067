pub mod common;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod network;
pub mod state;
pub mod storage;

pub use config::AppConfig;
pub use error::{RelayError, RelayResult};
pub use state::AppState;
