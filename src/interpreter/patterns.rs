use regex::{Captures, Regex};

use crate::common::Command;

/// Builds a [`Command`] from the captures of a matched pattern.
pub type Builder = fn(&Captures<'_>) -> Command;

/// Bảng lệnh theo thứ tự ưu tiên: mẫu đầu tiên khớp sẽ thắng.
pub const COMMAND_PATTERNS: &[(&str, Builder)] = &[
    (
        r"(?i)create a new file named (\S+)(?: in the (\S+) project)?",
        build_create,
    ),
    (r"(?i)write (.+) to file (\S+)", build_write),
    (r"(?i)read (?:the )?file (\S+)", build_read),
    (r"(?i)list files in (?:the )?folder (\S+)", build_list),
    (r"(?i)delete (?:the )?file (\S+)", build_delete),
    (r"(?i)clear (?:the )?file (\S+)", build_clear),
    (r"(?i)rename (?:the )?file (\S+) to (\S+)", build_rename),
    (r"(?i)move (?:the )?file (\S+) to (\S+)", build_move),
    (r"(?i)export chat history", build_export),
];

fn group(caps: &Captures<'_>, index: usize) -> String {
    caps.get(index)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn build_create(caps: &Captures<'_>) -> Command {
    Command::CreateFile {
        name: group(caps, 1),
        project: caps.get(2).map(|m| m.as_str().to_string()),
    }
}

fn build_write(caps: &Captures<'_>) -> Command {
    Command::WriteFile {
        content: group(caps, 1),
        filename: group(caps, 2),
    }
}

fn build_read(caps: &Captures<'_>) -> Command {
    Command::ReadFile {
        filename: group(caps, 1),
    }
}

fn build_list(caps: &Captures<'_>) -> Command {
    Command::ListFolder {
        folder: group(caps, 1),
    }
}

fn build_delete(caps: &Captures<'_>) -> Command {
    Command::DeleteFile {
        filename: group(caps, 1),
    }
}

fn build_clear(caps: &Captures<'_>) -> Command {
    Command::ClearFile {
        filename: group(caps, 1),
    }
}

fn build_rename(caps: &Captures<'_>) -> Command {
    Command::RenameFile {
        old_name: group(caps, 1),
        new_name: group(caps, 2),
    }
}

fn build_move(caps: &Captures<'_>) -> Command {
    Command::MoveFile {
        old_name: group(caps, 1),
        new_location: group(caps, 2),
    }
}

fn build_export(_caps: &Captures<'_>) -> Command {
    Command::ExportHistory
}

/// Compiles the command table, keeping its order.
pub fn compile() -> Result<Vec<(Regex, Builder)>, regex::Error> {
    COMMAND_PATTERNS
        .iter()
        .map(|(pattern, builder)| Regex::new(pattern).map(|regex| (regex, *builder)))
        .collect()
}
