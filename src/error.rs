use std::fmt;

use thiserror::Error;

/// Category code carried by every [`PgDriverError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ConnectionError,
    ErrorInQuery,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConnectionError => "CONNECTION_ERROR",
            ErrorCode::ErrorInQuery => "ERROR_IN_QUERY",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for pgdriver operations
#[derive(Debug, Error)]
pub enum PgDriverError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Error in query: {0}")]
    Query(String),
}

impl PgDriverError {
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Connection(_) => ErrorCode::ConnectionError,
            Self::Query(_) => ErrorCode::ErrorInQuery,
        }
    }

    /// The backend text this error was raised with, without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Connection(msg) | Self::Query(msg) => msg,
        }
    }
}

/// Renders a client-library error the way the server reported it.
///
/// Server-side failures carry severity, message, detail and hint; everything
/// else (closed socket, protocol errors) falls back to the client's own text.
pub(crate) fn backend_message(err: &tokio_postgres::Error) -> String {
    match err.as_db_error() {
        Some(db) => db.to_string(),
        None => err.to_string(),
    }
}

/// Result type alias for pgdriver operations
pub type Result<T> = std::result::Result<T, PgDriverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(
            PgDriverError::connection("refused").code(),
            ErrorCode::ConnectionError
        );
        assert_eq!(PgDriverError::query("bad").code(), ErrorCode::ErrorInQuery);
        assert_eq!(ErrorCode::ConnectionError.to_string(), "CONNECTION_ERROR");
        assert_eq!(ErrorCode::ErrorInQuery.to_string(), "ERROR_IN_QUERY");
    }

    #[test]
    fn test_message_is_verbatim() {
        let err = PgDriverError::query("ERROR: relation \"nope\" does not exist");
        assert_eq!(err.message(), "ERROR: relation \"nope\" does not exist");
        assert_eq!(
            err.to_string(),
            "Error in query: ERROR: relation \"nope\" does not exist"
        );
    }
}
