use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Failure class of an [`FsplitError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Read,
    Parse,
    Write,
}

/// Errors that can occur while splitting a package.
///
/// Every variant carries the file or directory it originated from.
#[derive(Debug, thiserror::Error)]
pub enum FsplitError {
    #[error("read error: {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("parse error: {}:{line}:{column}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("write error: {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },
}

impl FsplitError {
    pub fn read(path: impl Into<PathBuf>, err: impl Display) -> Self {
        Self::Read {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// `line` and `column` are 1-based.
    pub fn parse(
        path: impl Into<PathBuf>,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::Parse {
            path: path.into(),
            line,
            column,
            message: message.into(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, err: impl Display) -> Self {
        Self::Write {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Read { .. } => ErrorKind::Read,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Write { .. } => ErrorKind::Write,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Write { path, .. } => path,
        }
    }
}
