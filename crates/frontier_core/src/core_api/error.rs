use std::error::Error;
use std::fmt;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorCode {
    Io,
    TruncatedRecord,
    SourceDestConflict,
    InvalidInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreError {
    pub code: CoreErrorCode,
    pub message: String,
}

impl CoreError {
    pub fn new(code: CoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Classifies an io error: short reads become `TruncatedRecord`,
    /// rejected requests `InvalidInput`, anything else `Io`.
    pub fn from_io(context: impl fmt::Display, err: io::Error) -> Self {
        let code = match err.kind() {
            io::ErrorKind::UnexpectedEof => CoreErrorCode::TruncatedRecord,
            io::ErrorKind::InvalidInput => CoreErrorCode::InvalidInput,
            _ => CoreErrorCode::Io,
        };
        Self::new(code, format!("{context}: {err}"))
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl Error for CoreError {}
