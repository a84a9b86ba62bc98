//! Error types for connection resolution and dialing.

use std::time::Duration;

use thiserror::Error;

use crate::inspect::ErrorStatus;

/// Errors produced while resolving a connection string or dialing the server.
#[derive(Error, Debug)]
pub enum DialError {
    /// The input looked like a URI but could not be parsed as one.
    #[error("invalid MySQL URI format: {0}")]
    MalformedUri(String),

    /// The input looked like a native DSN but could not be parsed as one.
    #[error("invalid MySQL DSN format: {0}")]
    MalformedDsn(String),

    /// A required option was not supplied.
    #[error("missing required option {0}")]
    MissingOption(String),

    /// A recognized option carried a value that cannot be used.
    #[error("invalid option '{key}': {message}")]
    InvalidOption { key: String, message: String },

    /// The wire layer rejected the connection attempt.
    #[error("connection failed ({status}): {source}")]
    Connect {
        status: ErrorStatus,
        #[source]
        source: mysql_async::Error,
    },

    /// The connection attempt did not complete within the configured bound.
    #[error("connection attempt timed out after {0:?}")]
    Timeout(Duration),
}

/// Result type for resolution and dialing operations.
pub type DialResult<T> = Result<T, DialError>;

impl From<mysql_async::Error> for DialError {
    fn from(err: mysql_async::Error) -> Self {
        let status = match &err {
            mysql_async::Error::Server(server) => {
                crate::inspect::inspect_server_error(server.code, &server.state)
            }
            mysql_async::Error::Io(_) => ErrorStatus::Io,
            _ => ErrorStatus::Unknown,
        };
        Self::Connect {
            status,
            source: err,
        }
    }
}

/// Which connection-string grammar an input is being parsed under.
///
/// Callers distinguish URI failures from DSN failures, so every structural
/// error must carry its format class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Grammar {
    Uri,
    Dsn,
}

impl Grammar {
    pub(crate) fn malformed(self, message: impl Into<String>) -> DialError {
        match self {
            Self::Uri => DialError::MalformedUri(message.into()),
            Self::Dsn => DialError::MalformedDsn(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_format_class() {
        let err = DialError::MalformedUri("unterminated '[' in host".to_string());
        assert!(err.to_string().contains("invalid MySQL URI format"));

        let err = DialError::MalformedDsn("network address not terminated".to_string());
        assert!(err.to_string().contains("invalid MySQL DSN format"));
    }

    #[test]
    fn test_missing_option_message() {
        let err = DialError::MissingOption("uri".to_string());
        assert_eq!(err.to_string(), "missing required option uri");
    }

    #[test]
    fn test_invalid_option_names_key() {
        let err = DialError::InvalidOption {
            key: "tls".to_string(),
            message: "unknown TLS mode 'maybe'".to_string(),
        };
        assert!(err.to_string().contains("'tls'"));
        assert!(err.to_string().contains("maybe"));
    }

    #[test]
    fn test_grammar_picks_error_kind() {
        assert!(matches!(
            Grammar::Uri.malformed("x"),
            DialError::MalformedUri(_)
        ));
        assert!(matches!(
            Grammar::Dsn.malformed("x"),
            DialError::MalformedDsn(_)
        ));
    }
}
