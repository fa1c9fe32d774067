pub mod files;
pub mod history;
pub mod paths;

pub use files::FileExecutor;
pub use history::ChatHistory;
pub use paths::{PathPolicy, PathResolver};
