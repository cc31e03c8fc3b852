use std::path::PathBuf;

/// Which end of the tape a cursor move ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Errors raised while executing instructions against the tape.
///
/// `UnbalancedBlocks` and `OutOfBounds` are recoverable: the session reports
/// them and moves on to the next prompt with the tape left as it was.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// A close marker appeared before its opener.
    #[error("Error! unbalanced blocks")]
    UnbalancedBlocks,

    /// A cursor move would leave the tape.
    #[error("Error! current cell is at the {} of memory", edge_name(.0))]
    OutOfBounds(Direction),

    /// Reading the `,` input byte or writing the `.` output byte failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn edge_name(direction: &Direction) -> &'static str {
    match direction {
        Direction::Right => "end",
        Direction::Left => "beginning",
    }
}

/// Errors loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors that end an interactive session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("line source failed: {0}")]
    Input(#[source] std::io::Error),

    #[error("output failed: {0}")]
    Output(#[source] std::io::Error),

    #[error("program I/O failed: {0}")]
    ProgramIo(#[source] std::io::Error),

    #[error("cannot start editor: {0}")]
    Editor(String),
}
