use std::io;

use thiserror::Error;

/// Errors raised while starting the relay or executing a file command.
///
/// Precondition failures (missing file, existing file) are not errors: they
/// are ordinary replies. Only OS-level failures and policy rejections end up
/// here and are sent back as an error payload.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("invalid command pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("path '{0}' escapes the working root")]
    PathEscapesRoot(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },
}

pub type RelayResult<T> = Result<T, RelayError>;
