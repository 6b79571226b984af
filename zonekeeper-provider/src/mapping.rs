//! Cloudflare error-code mapping.
//!
//! Translates raw API error codes into the closed [`ProviderError`]
//! taxonomy so callers never see wire-level shapes.
//! Reference: <https://api.cloudflare.com/#getting-started-responses>

use crate::error::ProviderError;

/// Raw API error extracted from a response envelope.
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Numeric error code, when the envelope carried one.
    pub code: Option<String>,
    /// Original error message.
    pub message: String,
    /// HTTP status of the response.
    pub http_status: u16,
}

impl RawApiError {
    pub fn new(message: impl Into<String>, http_status: u16) -> Self {
        Self {
            code: None,
            message: message.into(),
            http_status,
        }
    }

    pub fn with_code(
        code: impl Into<String>,
        message: impl Into<String>,
        http_status: u16,
    ) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
            http_status,
        }
    }
}

/// Context for mapping errors that reference a record or zone.
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    pub record_name: Option<String>,
    pub record_id: Option<String>,
    pub zone: Option<String>,
}

/// Map a raw Cloudflare error to the unified taxonomy.
pub(crate) fn map_api_error(raw: RawApiError, context: ErrorContext) -> ProviderError {
    match raw.code.as_deref() {
        // Authentication errors
        // 6003: Invalid request headers
        // 6103: Invalid format for X-Auth-Key header
        // 6111: Invalid format for Authorization header
        // 9109: Unauthorized to access requested resource
        // 10000: Authentication error
        Some("6003" | "6103" | "6111" | "9109" | "10000") => ProviderError::InvalidCredentials {
            raw_message: Some(raw.message),
        },

        // Invalid parameter
        // 1004: DNS Validation Error
        // 9000: Invalid or missing name
        // 9005: Content for A record is invalid (must be IPv4)
        // 9006: Content for AAAA record is invalid (must be IPv6)
        // 9009: Content for MX record must be a hostname
        // 9021: Invalid TTL
        // 9041: This DNS record cannot be proxied
        Some(code @ ("1004" | "9000" | "9005" | "9006" | "9009" | "9021" | "9041")) => {
            let param = match code {
                "9000" => "name",
                "9005" | "9006" | "9009" => "content",
                "9021" => "ttl",
                "9041" => "proxied",
                // 1004 is a general validation error
                _ => "general",
            };
            ProviderError::InvalidParameter {
                param: param.to_string(),
                detail: raw.message,
            }
        }

        // Record already exists
        // 81053..81058: conflicting A/AAAA/CNAME/NS records
        Some("81053" | "81054" | "81055" | "81056" | "81057" | "81058") => {
            ProviderError::RecordExists {
                record_name: context
                    .record_name
                    .unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            }
        }

        // 81044: Record does not exist
        Some("81044") => ProviderError::RecordNotFound {
            record_id: context.record_id.unwrap_or_else(|| "<unknown>".to_string()),
            raw_message: Some(raw.message),
        },

        // 81045: The record quota has been exceeded
        Some("81045") => ProviderError::QuotaExceeded {
            raw_message: Some(raw.message),
        },

        // 7000: No route for that URI
        // 7003: Could not route to the path (invalid object identifier)
        Some("7000" | "7003") => ProviderError::ZoneNotFound {
            zone: context.zone.unwrap_or_else(|| "<unknown>".to_string()),
            raw_message: Some(raw.message),
        },

        // 10001: Unauthorized to access this zone
        Some("10001") => ProviderError::PermissionDenied {
            raw_message: Some(raw.message),
        },

        _ => ProviderError::Unknown {
            http_status: Some(raw.http_status),
            raw_code: raw.code,
            raw_message: raw.message,
        },
    }
}
