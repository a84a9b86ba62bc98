//! Classification of MySQL server errors.
//!
//! The server reports failures as a numeric error code plus a five-character
//! SQLSTATE. Callers usually want neither; they want to know whether the
//! failure was an authentication problem, a missing object, a constraint
//! violation, and so on. [`inspect_server_error`] maps the raw pair onto a
//! transport-agnostic [`ErrorStatus`].

/// Broad category of a server-reported failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorStatus {
    /// Credentials were rejected.
    Unauthenticated,
    /// The authenticated user lacks permission.
    Unauthorized,
    /// A referenced object does not exist.
    NotFound,
    /// An object being created already exists.
    AlreadyExists,
    /// A constraint (unique key, foreign key, NOT NULL) was violated.
    Integrity,
    /// The statement itself was invalid.
    InvalidArgument,
    /// A value could not be stored or converted.
    InvalidData,
    /// The server gave up waiting.
    Timeout,
    /// The operation was aborted, e.g. as a deadlock victim.
    Cancelled,
    /// The connection itself failed.
    Io,
    /// The server reported an internal error.
    Internal,
    /// No more specific category applies.
    Unknown,
}

impl ErrorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not found",
            Self::AlreadyExists => "already exists",
            Self::Integrity => "integrity violation",
            Self::InvalidArgument => "invalid argument",
            Self::InvalidData => "invalid data",
            Self::Timeout => "timeout",
            Self::Cancelled => "cancelled",
            Self::Io => "io failure",
            Self::Internal => "internal error",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a server error by its error number, falling back to the
/// SQLSTATE class when the number is not one we recognize.
pub fn inspect_server_error(code: u16, sqlstate: &str) -> ErrorStatus {
    let status = match code {
        // access denied
        1045 => ErrorStatus::Unauthenticated,
        // privilege checks
        1044 | 1142 | 1143 | 1227 => ErrorStatus::Unauthorized,
        // unknown table, unknown database
        1146 | 1049 => ErrorStatus::NotFound,
        // table or database already exists
        1050 | 1007 => ErrorStatus::AlreadyExists,
        // duplicate key, foreign key, NOT NULL, missing default
        1062 | 1451 | 1452 | 1048 | 1364 => ErrorStatus::Integrity,
        // parse error, bad column, ambiguous column
        1064 | 1054 | 1052 => ErrorStatus::InvalidArgument,
        // truncation and out-of-range values
        1366 | 1292 | 1264 => ErrorStatus::InvalidData,
        // lock wait timeout
        1205 => ErrorStatus::Timeout,
        // deadlock victim
        1213 => ErrorStatus::Cancelled,
        // client-side connection failures
        2002 | 2003 | 2006 | 2013 => ErrorStatus::Io,
        // ER_UNKNOWN_ERROR
        1105 => ErrorStatus::Internal,
        _ => ErrorStatus::Unknown,
    };

    if status != ErrorStatus::Unknown {
        return status;
    }

    match sqlstate.get(..2) {
        Some("28") => ErrorStatus::Unauthenticated,
        Some("42") => ErrorStatus::InvalidArgument,
        Some("23") => ErrorStatus::Integrity,
        _ => ErrorStatus::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_denied_is_unauthenticated() {
        assert_eq!(
            inspect_server_error(1045, "28000"),
            ErrorStatus::Unauthenticated
        );
    }

    #[test]
    fn test_unknown_table_and_database_are_not_found() {
        assert_eq!(inspect_server_error(1146, "42S02"), ErrorStatus::NotFound);
        assert_eq!(inspect_server_error(1049, "42000"), ErrorStatus::NotFound);
    }

    #[test]
    fn test_constraint_violations_are_integrity() {
        for code in [1062, 1451, 1452, 1048, 1364] {
            assert_eq!(inspect_server_error(code, "23000"), ErrorStatus::Integrity);
        }
    }

    #[test]
    fn test_lock_errors() {
        assert_eq!(inspect_server_error(1205, "HY000"), ErrorStatus::Timeout);
        assert_eq!(inspect_server_error(1213, "40001"), ErrorStatus::Cancelled);
    }

    #[test]
    fn test_connection_failures_are_io() {
        for code in [2002, 2003, 2006, 2013] {
            assert_eq!(inspect_server_error(code, "HY000"), ErrorStatus::Io);
        }
    }

    #[test]
    fn test_sqlstate_fallback_applies_only_to_unrecognized_codes() {
        // unrecognized code, authorization class
        assert_eq!(
            inspect_server_error(1873, "28000"),
            ErrorStatus::Unauthenticated
        );
        // unrecognized code, syntax class
        assert_eq!(
            inspect_server_error(3167, "42000"),
            ErrorStatus::InvalidArgument
        );
        // recognized code wins over its state class
        assert_eq!(inspect_server_error(1049, "42000"), ErrorStatus::NotFound);
    }

    #[test]
    fn test_unknown_code_and_state() {
        assert_eq!(inspect_server_error(1, "HY000"), ErrorStatus::Unknown);
        assert_eq!(inspect_server_error(1, ""), ErrorStatus::Unknown);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ErrorStatus::Unauthenticated.to_string(), "unauthenticated");
        assert_eq!(ErrorStatus::Io.to_string(), "io failure");
    }
}
