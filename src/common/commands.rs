/// Lệnh file được nhận dạng từ tin nhắn chat.
///
/// Chỉ tồn tại trong một bước xử lý tin nhắn, không bao giờ được lưu lại.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `project` is parsed but does not change the target path.
    CreateFile {
        name: String,
        project: Option<String>,
    },
    WriteFile {
        content: String,
        filename: String,
    },
    ReadFile {
        filename: String,
    },
    ListFolder {
        folder: String,
    },
    DeleteFile {
        filename: String,
    },
    ClearFile {
        filename: String,
    },
    RenameFile {
        old_name: String,
        new_name: String,
    },
    MoveFile {
        old_name: String,
        new_location: String,
    },
    ExportHistory,
}

impl Command {
    pub fn kind(&self) -> &'static str {
        match self {
            Command::CreateFile { .. } => "create-file",
            Command::WriteFile { .. } => "write-file",
            Command::ReadFile { .. } => "read-file",
            Command::ListFolder { .. } => "list-folder",
            Command::DeleteFile { .. } => "delete-file",
            Command::ClearFile { .. } => "clear-file",
            Command::RenameFile { .. } => "rename-file",
            Command::MoveFile { .. } => "move-file",
            Command::ExportHistory => "export-history",
        }
    }
}
