//! TLS negotiation modes.

use crate::error::{DialError, DialResult};

/// TLS negotiation mode for a connection attempt.
///
/// Derived once from the `tls` (or `ssl`) option during resolution and
/// immutable afterwards. The mode only states what the session is expected
/// to negotiate; certificate handling itself happens in the wire layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TlsMode {
    /// Never negotiate encryption.
    Disabled,
    /// Negotiate encryption when the server offers it.
    #[default]
    Preferred,
    /// Always negotiate encryption, without validating the server
    /// certificate.
    SkipVerify,
    /// Always negotiate encryption and validate the server certificate.
    Required,
}

impl TlsMode {
    /// Map the decoded `tls`/`ssl` option text to a mode.
    ///
    /// Accepted values: `true`/`1`/`required`, `skip-verify`,
    /// `false`/`0`/`disabled`, `preferred`. Anything else is rejected
    /// rather than silently treated as the default.
    pub fn from_option_text(text: &str) -> DialResult<Self> {
        match text.to_ascii_lowercase().as_str() {
            "true" | "1" | "required" => Ok(Self::Required),
            "skip-verify" => Ok(Self::SkipVerify),
            "false" | "0" | "disabled" => Ok(Self::Disabled),
            "preferred" => Ok(Self::Preferred),
            _ => Err(DialError::InvalidOption {
                key: "tls".to_string(),
                message: format!("unknown TLS mode '{}'", text),
            }),
        }
    }

    /// Get the mode name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Preferred => "preferred",
            Self::SkipVerify => "skip-verify",
            Self::Required => "required",
        }
    }

    /// Whether a session under this mode is expected to be encrypted,
    /// given whether the server offers TLS.
    pub fn negotiates_encryption(&self, server_offers: bool) -> bool {
        match self {
            Self::Disabled => false,
            Self::Preferred => server_offers,
            Self::SkipVerify | Self::Required => true,
        }
    }
}

impl std::fmt::Display for TlsMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_text_mapping() {
        assert_eq!(TlsMode::from_option_text("true").unwrap(), TlsMode::Required);
        assert_eq!(TlsMode::from_option_text("1").unwrap(), TlsMode::Required);
        assert_eq!(
            TlsMode::from_option_text("required").unwrap(),
            TlsMode::Required
        );
        assert_eq!(
            TlsMode::from_option_text("skip-verify").unwrap(),
            TlsMode::SkipVerify
        );
        assert_eq!(
            TlsMode::from_option_text("false").unwrap(),
            TlsMode::Disabled
        );
        assert_eq!(TlsMode::from_option_text("0").unwrap(), TlsMode::Disabled);
        assert_eq!(
            TlsMode::from_option_text("disabled").unwrap(),
            TlsMode::Disabled
        );
        assert_eq!(
            TlsMode::from_option_text("preferred").unwrap(),
            TlsMode::Preferred
        );
    }

    #[test]
    fn test_mapping_is_case_insensitive() {
        assert_eq!(TlsMode::from_option_text("TRUE").unwrap(), TlsMode::Required);
        assert_eq!(
            TlsMode::from_option_text("Skip-Verify").unwrap(),
            TlsMode::SkipVerify
        );
    }

    #[test]
    fn test_unknown_value_is_rejected() {
        let err = TlsMode::from_option_text("maybe").unwrap_err();
        assert!(matches!(err, DialError::InvalidOption { ref key, .. } if key == "tls"));
        assert!(err.to_string().contains("maybe"));
    }

    #[test]
    fn test_default_is_preferred() {
        assert_eq!(TlsMode::default(), TlsMode::Preferred);
    }

    #[test]
    fn test_encryption_contract() {
        assert!(!TlsMode::Disabled.negotiates_encryption(true));
        assert!(!TlsMode::Disabled.negotiates_encryption(false));
        assert!(TlsMode::Required.negotiates_encryption(false));
        assert!(TlsMode::SkipVerify.negotiates_encryption(false));
        assert!(TlsMode::Preferred.negotiates_encryption(true));
        assert!(!TlsMode::Preferred.negotiates_encryption(false));
    }

    #[test]
    fn test_display_round_trips_through_option_text() {
        for mode in [
            TlsMode::Disabled,
            TlsMode::Preferred,
            TlsMode::SkipVerify,
            TlsMode::Required,
        ] {
            assert_eq!(TlsMode::from_option_text(mode.as_str()).unwrap(), mode);
        }
    }
}
