use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use uuid::Uuid;

pub type ConnectionId = Uuid;

/// Outbound queue of one connection; drained by that connection's writer.
/// Unbounded: a client that stops reading keeps accumulating broadcasts until
/// its socket closes. Accepted for a low-traffic local relay.
pub type Outbox = mpsc::UnboundedSender<String>;

/// Tập các kết nối đang mở, dùng để phát tin nhắn chat.
#[derive(Clone, Default)]
pub struct Registry {
    connections: Arc<Mutex<HashMap<ConnectionId, Outbox>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fresh connection and returns the receiving end of its queue.
    pub async fn register(&self) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        self.connections.lock().await.insert(id, tx);
        (id, rx)
    }

    /// Removing an unknown id is a no-op.
    pub async fn unregister(&self, id: &ConnectionId) -> bool {
        self.connections.lock().await.remove(id).is_some()
    }

    /// Queues `message` for one connection. Returns false when the
    /// connection is gone or no longer draining its queue.
    pub async fn send_to(&self, id: &ConnectionId, message: String) -> bool {
        match self.connections.lock().await.get(id) {
            Some(outbox) => outbox.send(message).is_ok(),
            None => false,
        }
    }

    /// Queues `message` for every open connection; closed ones are skipped.
    /// Returns how many connections accepted it.
    pub async fn broadcast(&self, message: &str) -> usize {
        let connections = self.connections.lock().await;
        let mut delivered = 0;
        for outbox in connections.values() {
            if outbox.is_closed() {
                continue;
            }
            if outbox.send(message.to_string()).is_ok() {
                delivered += 1;
            }
        }
        delivered
    }

    pub async fn len(&self) -> usize {
        self.connections.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.connections.lock().await.is_empty()
    }

    pub async fn clear(&self) {
        self.connections.lock().await.clear();
    }
}
