use serde::{Deserialize, Serialize};

/// Unified error type for all Cloudflare API operations.
///
/// Every failure leaving this crate is one of these variants; callers never
/// see raw transport errors or provider wire shapes. All variants are
/// serializable for structured error reporting.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on
/// retry:
/// - [`NetworkError`](Self::NetworkError) — network connectivity issues
/// - [`Timeout`](Self::Timeout) — request timed out
/// - [`RateLimited`](Self::RateLimited) — API rate limit exceeded
///
/// The built-in HTTP client automatically retries these with exponential
/// backoff, up to the configured retry bound.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection
    /// refused, 5xx gateway response, etc.).
    ///
    /// This is a transient error and is automatically retried.
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    ///
    /// This is a transient error and is automatically retried.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    ///
    /// This is a transient error; the request should succeed after waiting.
    RateLimited {
        /// Suggested wait time in seconds before retrying, if provided.
        retry_after: Option<u64>,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The provided credentials were rejected by the provider.
    InvalidCredentials {
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// A DNS record with the same name/type already exists.
    RecordExists {
        /// Name of the conflicting record.
        record_name: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The specified DNS record was not found.
    RecordNotFound {
        /// ID of the record that was not found.
        record_id: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// A request parameter is invalid (e.g., bad TTL value, malformed IP
    /// address).
    InvalidParameter {
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The account's record quota has been exceeded.
    ///
    /// Unlike [`RateLimited`](Self::RateLimited), this is not transient.
    QuotaExceeded {
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The specified zone was not found or is not reachable with these
    /// credentials.
    ZoneNotFound {
        /// Zone id that was not found.
        zone: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The authenticated user lacks permission for the requested operation.
    PermissionDenied {
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// Failed to parse the provider's API response.
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// An unrecognized error from the provider API.
    ///
    /// This is a catch-all for error codes not yet mapped to a specific
    /// variant.
    Unknown {
        /// HTTP status of the response, when one was received.
        http_status: Option<u16>,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl ProviderError {
    /// Whether the failure is transient and worth retrying.
    ///
    /// Authentication failures and malformed-input errors are never
    /// retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }

    /// Whether this is expected behavior (operator input, resource does not
    /// exist, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error`
    /// when returning `false`. Update this method when adding variants.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::RecordExists { .. }
                | Self::RecordNotFound { .. }
                | Self::InvalidParameter { .. }
                | Self::QuotaExceeded { .. }
                | Self::ZoneNotFound { .. }
                | Self::PermissionDenied { .. }
        )
    }

    /// HTTP-equivalent status for this error kind, when one applies.
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::RateLimited { .. } => Some(429),
            Self::InvalidCredentials { .. } => Some(403),
            Self::RecordNotFound { .. } | Self::ZoneNotFound { .. } => Some(404),
            Self::InvalidParameter { .. } => Some(400),
            Self::PermissionDenied { .. } => Some(403),
            Self::Unknown { http_status, .. } => *http_status,
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { detail } => {
                write!(f, "Network error: {detail}")
            }
            Self::Timeout { detail } => {
                write!(f, "Request timeout: {detail}")
            }
            Self::RateLimited { retry_after, .. } => {
                if let Some(secs) = retry_after {
                    write!(f, "Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "Rate limited")
                }
            }
            Self::InvalidCredentials { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Invalid credentials: {msg}")
                } else {
                    write!(f, "Invalid credentials")
                }
            }
            Self::RecordExists { record_name, .. } => {
                write!(f, "Record '{record_name}' already exists")
            }
            Self::RecordNotFound { record_id, .. } => {
                write!(f, "Record '{record_id}' not found")
            }
            Self::InvalidParameter { param, detail } => {
                write!(f, "Invalid parameter '{param}': {detail}")
            }
            Self::QuotaExceeded { .. } => {
                write!(f, "Record quota exceeded")
            }
            Self::ZoneNotFound { zone, raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Zone '{zone}' not found: {msg}")
                } else {
                    write!(f, "Zone '{zone}' not found")
                }
            }
            Self::PermissionDenied { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Permission denied: {msg}")
                } else {
                    write!(f, "Permission denied")
                }
            }
            Self::ParseError { detail } => {
                write!(f, "Parse error: {detail}")
            }
            Self::Unknown { raw_message, .. } => {
                write!(f, "{raw_message}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = ProviderError::NetworkError {
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "Network error: connection refused");
    }

    #[test]
    fn display_invalid_credentials_with_message() {
        let e = ProviderError::InvalidCredentials {
            raw_message: Some("bad key".to_string()),
        };
        assert_eq!(e.to_string(), "Invalid credentials: bad key");
    }

    #[test]
    fn display_invalid_credentials_without_message() {
        let e = ProviderError::InvalidCredentials { raw_message: None };
        assert_eq!(e.to_string(), "Invalid credentials");
    }

    #[test]
    fn display_record_exists() {
        let e = ProviderError::RecordExists {
            record_name: "www".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "Record 'www' already exists");
    }

    #[test]
    fn display_rate_limited_with_retry() {
        let e = ProviderError::RateLimited {
            retry_after: Some(30),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "Rate limited (retry after 30s)");
    }

    #[test]
    fn display_zone_not_found() {
        let e = ProviderError::ZoneNotFound {
            zone: "z1".to_string(),
            raw_message: Some("no such zone".to_string()),
        };
        assert_eq!(e.to_string(), "Zone 'z1' not found: no such zone");
    }

    #[test]
    fn retryable_set_is_exactly_transient() {
        assert!(ProviderError::NetworkError { detail: "x".into() }.is_retryable());
        assert!(ProviderError::Timeout { detail: "x".into() }.is_retryable());
        assert!(ProviderError::RateLimited {
            retry_after: None,
            raw_message: None,
        }
        .is_retryable());

        assert!(!ProviderError::InvalidCredentials { raw_message: None }.is_retryable());
        assert!(!ProviderError::QuotaExceeded { raw_message: None }.is_retryable());
        assert!(!ProviderError::InvalidParameter {
            param: "ttl".into(),
            detail: "bad".into(),
        }
        .is_retryable());
        assert!(!ProviderError::ParseError { detail: "x".into() }.is_retryable());
        assert!(!ProviderError::Unknown {
            http_status: Some(500),
            raw_code: None,
            raw_message: "x".into(),
        }
        .is_retryable());
    }

    #[test]
    fn expected_errors_classified() {
        assert!(ProviderError::InvalidCredentials { raw_message: None }.is_expected());
        assert!(ProviderError::RecordNotFound {
            record_id: "1".into(),
            raw_message: None,
        }
        .is_expected());
        assert!(!ProviderError::NetworkError { detail: "x".into() }.is_expected());
        assert!(!ProviderError::ParseError { detail: "x".into() }.is_expected());
    }

    #[test]
    fn http_status_mapping() {
        assert_eq!(
            ProviderError::RateLimited {
                retry_after: None,
                raw_message: None,
            }
            .http_status(),
            Some(429)
        );
        assert_eq!(
            ProviderError::Unknown {
                http_status: Some(500),
                raw_code: None,
                raw_message: "x".into(),
            }
            .http_status(),
            Some(500)
        );
        assert_eq!(
            ProviderError::NetworkError { detail: "x".into() }.http_status(),
            None
        );
    }

    #[test]
    fn serialize_json_tagged_by_code() {
        let e = ProviderError::RateLimited {
            retry_after: Some(60),
            raw_message: Some("too many requests".to_string()),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"RateLimited\""));
        assert!(json.contains("\"retry_after\":60"));
    }

    #[test]
    fn deserialize_round_trip_all_variants() {
        let variants: Vec<ProviderError> = vec![
            ProviderError::NetworkError { detail: "d".into() },
            ProviderError::Timeout { detail: "30s".into() },
            ProviderError::RateLimited {
                retry_after: Some(30),
                raw_message: None,
            },
            ProviderError::InvalidCredentials { raw_message: None },
            ProviderError::RecordExists {
                record_name: "www".into(),
                raw_message: None,
            },
            ProviderError::RecordNotFound {
                record_id: "1".into(),
                raw_message: None,
            },
            ProviderError::InvalidParameter {
                param: "ttl".into(),
                detail: "bad".into(),
            },
            ProviderError::QuotaExceeded { raw_message: None },
            ProviderError::ZoneNotFound {
                zone: "z1".into(),
                raw_message: None,
            },
            ProviderError::PermissionDenied { raw_message: None },
            ProviderError::ParseError { detail: "bad".into() },
            ProviderError::Unknown {
                http_status: Some(418),
                raw_code: Some("E1".into()),
                raw_message: "oops".into(),
            },
        ];

        for v in &variants {
            let json = serde_json::to_string(v).unwrap();
            let back: ProviderError = serde_json::from_str(&json).unwrap();
            assert_eq!(back.to_string(), v.to_string());
        }
    }
}
