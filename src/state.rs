use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::RelayResult;
use crate::interpreter::Interpreter;
use crate::network::Registry;
use crate::storage::{ChatHistory, FileExecutor, PathResolver};

/// Process-scoped state shared by every session.
#[derive(Clone)]
pub struct AppState {
    pub registry: Registry,
    pub history: ChatHistory,
    pub interpreter: Arc<Interpreter>,
    pub executor: Arc<FileExecutor>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> RelayResult<Self> {
        let root = std::path::absolute(&config.root)?;
        let history_path = root.join(&config.history_file);
        Ok(Self {
            registry: Registry::new(),
            history: ChatHistory::new(history_path),
            interpreter: Arc::new(Interpreter::new()?),
            executor: Arc::new(FileExecutor::new(PathResolver::new(
                root,
                config.path_policy,
            ))),
        })
    }

    pub async fn shutdown(&self) {
        let open = self.registry.len().await;
        self.registry.clear().await;
        log::info!("Registry cleared ({open} connections dropped)");
    }
}
