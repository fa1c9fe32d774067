/// Kết quả xử lý một tin nhắn gửi đến: trả lời riêng hoặc phát cho mọi người.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Sent to the initiating connection only.
    Direct(String),
    /// Sent verbatim to every open connection, sender included.
    Broadcast(String),
}
