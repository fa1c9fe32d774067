//! Command Interpreter: turns free chat text into at most one [`Command`].

pub mod patterns;

use regex::Regex;

use crate::common::Command;
use crate::error::RelayResult;

use patterns::Builder;

pub struct Interpreter {
    table: Vec<(Regex, Builder)>,
}

impl Interpreter {
    pub fn new() -> RelayResult<Self> {
        Ok(Self {
            table: patterns::compile()?,
        })
    }

    /// Tries every pattern in priority order; the first match wins.
    /// `None` means the text is plain chat and should be broadcast.
    pub fn interpret(&self, text: &str) -> Option<Command> {
        self.table.iter().find_map(|(regex, build)| {
            regex.captures(text).map(|caps| build(&caps))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpret(text: &str) -> Option<Command> {
        Interpreter::new().unwrap().interpret(text)
    }

    #[test]
    fn create_file_with_and_without_project() {
        assert_eq!(
            interpret("create a new file named notes.txt"),
            Some(Command::CreateFile {
                name: "notes.txt".into(),
                project: None
            })
        );
        assert_eq!(
            interpret("Please create a new file named src/app.rs in the demo project"),
            Some(Command::CreateFile {
                name: "src/app.rs".into(),
                project: Some("demo".into())
            })
        );
    }

    #[test]
    fn create_wins_over_later_patterns() {
        assert_eq!(
            interpret("create a new file named a.txt then write x to file b.txt"),
            Some(Command::CreateFile {
                name: "a.txt".into(),
                project: None
            })
        );
    }

    #[test]
    fn write_captures_greedy_content() {
        assert_eq!(
            interpret("write hello world to file notes.txt"),
            Some(Command::WriteFile {
                content: "hello world".into(),
                filename: "notes.txt".into()
            })
        );
        // Greedy: the last " to file " splits content from name.
        assert_eq!(
            interpret("write a to file b to file c.txt"),
            Some(Command::WriteFile {
                content: "a to file b".into(),
                filename: "c.txt".into()
            })
        );
    }

    #[test]
    fn optional_article_is_accepted() {
        assert_eq!(
            interpret("read the file notes.txt"),
            Some(Command::ReadFile {
                filename: "notes.txt".into()
            })
        );
        assert_eq!(
            interpret("list files in folder src"),
            Some(Command::ListFolder {
                folder: "src".into()
            })
        );
        assert_eq!(
            interpret("delete the file old.txt"),
            Some(Command::DeleteFile {
                filename: "old.txt".into()
            })
        );
        assert_eq!(
            interpret("clear file log.txt"),
            Some(Command::ClearFile {
                filename: "log.txt".into()
            })
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            interpret("READ FILE Notes.TXT"),
            Some(Command::ReadFile {
                filename: "Notes.TXT".into()
            })
        );
        assert_eq!(interpret("Export Chat History please"), Some(Command::ExportHistory));
    }

    #[test]
    fn rename_and_move_take_two_tokens() {
        assert_eq!(
            interpret("rename the file a.txt to b.txt"),
            Some(Command::RenameFile {
                old_name: "a.txt".into(),
                new_name: "b.txt".into()
            })
        );
        assert_eq!(
            interpret("move file a.txt to archive/a.txt"),
            Some(Command::MoveFile {
                old_name: "a.txt".into(),
                new_location: "archive/a.txt".into()
            })
        );
    }

    #[test]
    fn earlier_pattern_takes_priority() {
        // Matches both read (3) and delete (5); read is listed first.
        assert_eq!(
            interpret("delete file x.txt or read file y.txt"),
            Some(Command::ReadFile {
                filename: "y.txt".into()
            })
        );
    }

    #[test]
    fn plain_chat_is_not_a_command() {
        assert_eq!(interpret("hello everyone"), None);
        assert_eq!(interpret("read file"), None);
        assert_eq!(interpret("write to file"), None);
    }
}
