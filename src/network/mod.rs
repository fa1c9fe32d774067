pub mod registry;
pub mod server;
pub mod session;

pub use registry::{ConnectionId, Registry};
