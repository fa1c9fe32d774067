use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};

use crate::common::{Command, ErrorPayload, Reply};
use crate::error::RelayResult;
use crate::state::AppState;

use super::registry::ConnectionId;

/// Drives one WebSocket connection until it closes.
pub async fn run(socket: WebSocket, state: AppState) {
    let (mut sink, mut stream) = socket.split();
    let (id, mut outbox) = state.registry.register().await;
    log::info!(
        "Connection {id} opened ({} open)",
        state.registry.len().await
    );

    let writer = tokio::spawn(async move {
        while let Some(text) = outbox.recv().await {
            if let Err(err) = sink.send(Message::Text(text.into())).await {
                log::warn!("Failed to send to {id}: {err}");
                break;
            }
        }
    });

    while let Some(frame) = stream.next().await {
        let text = match frame {
            Ok(Message::Text(text)) => text.as_str().to_owned(),
            Ok(Message::Binary(bytes)) => String::from_utf8_lossy(&bytes).into_owned(),
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(err) => {
                log::debug!("Connection {id} read error: {err}");
                break;
            }
        };
        handle_message(&state, id, &text).await;
    }

    state.registry.unregister(&id).await;
    writer.abort();
    log::info!(
        "Connection {id} closed ({} open)",
        state.registry.len().await
    );
}

/// Logs the message, then either answers the sender or broadcasts it.
/// Exactly one of the two happens per message.
pub async fn handle_message(state: &AppState, from: ConnectionId, text: &str) -> Reply {
    state.history.record(text).await;

    let reply = match state.interpreter.interpret(text) {
        Some(command) => {
            log::debug!("Connection {from} issued {}", command.kind());
            Reply::Direct(render(run_command(state, &command).await))
        }
        None => Reply::Broadcast(text.to_string()),
    };

    match &reply {
        Reply::Direct(body) => {
            if !state.registry.send_to(&from, body.clone()).await {
                log::warn!("Connection {from} left before its reply was sent");
            }
        }
        Reply::Broadcast(body) => {
            let delivered = state.registry.broadcast(body).await;
            log::debug!("Broadcast from {from} delivered to {delivered} connections");
        }
    }

    reply
}

async fn run_command(state: &AppState, command: &Command) -> RelayResult<String> {
    let exec = &state.executor;
    match command {
        Command::CreateFile { name, .. } => exec.create_file(name).await,
        Command::WriteFile { content, filename } => exec.write_file(filename, content).await,
        Command::ReadFile { filename } => exec.read_file(filename).await,
        Command::ListFolder { folder } => exec.list_folder(folder).await,
        Command::DeleteFile { filename } => exec.delete_file(filename).await,
        Command::ClearFile { filename } => exec.clear_file(filename).await,
        Command::RenameFile { old_name, new_name } => exec.rename_file(old_name, new_name).await,
        Command::MoveFile {
            old_name,
            new_location,
        } => exec.move_file(old_name, new_location).await,
        Command::ExportHistory => {
            state.history.export().await?;
            Ok(format!(
                "Chat history exported to '{}'.",
                state.history.file_name()
            ))
        }
    }
}

fn render(result: RelayResult<String>) -> String {
    match result {
        Ok(text) => text,
        Err(err) => {
            log::warn!("Command failed: {err}");
            ErrorPayload::new(err.to_string()).to_json()
        }
    }
}
