use std::path::PathBuf;

use chat_relay::config::{self, AppConfig};
use chat_relay::error::RelayError;
use chat_relay::network::server;
use chat_relay::state::AppState;
use clap::Parser;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;

#[derive(Parser)]
#[command(
    name = "chat_relay",
    version,
    about = "WebSocket chat relay with file commands"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,
    /// Address to bind (overrides RELAY_HOST)
    #[arg(long)]
    host: Option<String>,
    /// Directory file commands resolve against (overrides RELAY_ROOT)
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,
}

impl Cli {
    fn resolve_config(&self) -> AppConfig {
        let mut app_config = config::load_config(&self.config);
        app_config.apply_env();
        if let Some(port) = self.port {
            app_config.port = port;
        }
        if let Some(host) = &self.host {
            app_config.host = host.clone();
        }
        if let Some(root) = &self.root {
            app_config.root = root.clone();
        }
        app_config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let app_config = cli.resolve_config();
    log::info!(
        "Starting chat relay (root={}, history={}, policy={:?})",
        app_config.root.display(),
        app_config.history_path().display(),
        app_config.path_policy
    );

    let state = AppState::new(&app_config)?;
    let addr = app_config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| RelayError::Bind {
            addr: addr.clone(),
            source,
        })?;

    server::serve(listener, state, shutdown_signal()).await?;

    log::info!("Chat relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            log::warn!("Failed to install Ctrl-C handler: {err}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => log::warn!("Failed to install SIGTERM handler: {err}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    log::info!("Received shutdown signal, stopping chat relay...");
}
