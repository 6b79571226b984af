//! Shared HTTP execution for the Cloudflare client.
//!
//! One place handles sending requests, logging, transient-error
//! classification, and bounded retry with exponential backoff, so every
//! API verb goes through identical policy.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::ProviderError;
use crate::util::truncate_for_log;

/// Perform an HTTP request and return `(status, body)`.
///
/// Transport failures become [`ProviderError::NetworkError`] or
/// [`ProviderError::Timeout`]; HTTP 429 becomes
/// [`ProviderError::RateLimited`] (honoring `Retry-After`); 502–504 become
/// retryable network errors. Any other status is returned to the caller
/// together with the body for envelope-level classification.
pub(crate) async fn execute_request(
    request_builder: RequestBuilder,
    method_name: &str,
    url_or_path: &str,
) -> Result<(u16, String), ProviderError> {
    log::debug!("{method_name} {url_or_path}");

    let response = request_builder.send().await.map_err(|e| {
        if e.is_timeout() {
            ProviderError::Timeout {
                detail: e.to_string(),
            }
        } else {
            ProviderError::NetworkError {
                detail: e.to_string(),
            }
        }
    })?;

    let status_code = response.status().as_u16();
    log::debug!("Response status: {status_code}");

    // Extract Retry-After before consuming the body.
    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    if status_code == 429 {
        let body = response.text().await.unwrap_or_default();
        log::warn!("Rate limited (HTTP 429), retry_after={retry_after:?}");
        return Err(ProviderError::RateLimited {
            retry_after,
            raw_message: Some(body),
        });
    }

    if matches!(status_code, 502..=504) {
        let body = response.text().await.unwrap_or_default();
        log::warn!("Server error (HTTP {status_code})");
        return Err(ProviderError::NetworkError {
            detail: format!("HTTP {status_code}: {body}"),
        });
    }

    let response_text = response
        .text()
        .await
        .map_err(|e| ProviderError::NetworkError {
            detail: format!("failed to read response body: {e}"),
        })?;

    log::debug!("Response body: {}", truncate_for_log(&response_text));

    Ok((status_code, response_text))
}

/// Perform an HTTP request with bounded retry.
///
/// Only errors for which [`ProviderError::is_retryable`] holds are retried
/// (network failure, timeout, rate limiting); authentication and
/// malformed-input errors fail immediately. Backoff is exponential,
/// overridden by `Retry-After` when the provider supplies one.
pub(crate) async fn execute_request_with_retry(
    request_builder: RequestBuilder,
    method_name: &str,
    url_or_path: &str,
    max_retries: u32,
) -> Result<(u16, String), ProviderError> {
    if max_retries == 0 {
        return execute_request(request_builder, method_name, url_or_path).await;
    }

    let mut last_error = None;

    for attempt in 0..=max_retries {
        // RequestBuilder is single-use; clone per attempt.
        let Some(req) = request_builder.try_clone() else {
            // Unclonable (streaming body): fall back to a single attempt.
            log::warn!("Cannot clone request, disabling retry for {method_name} {url_or_path}");
            return execute_request(request_builder, method_name, url_or_path).await;
        };

        match execute_request(req, method_name, url_or_path).await {
            Ok(resp) => return Ok(resp),
            Err(e) if attempt < max_retries && e.is_retryable() => {
                let delay = retry_delay(&e, attempt);
                log::warn!(
                    "Request failed (attempt {}/{}), retrying in {:.1}s: {}",
                    attempt + 1,
                    max_retries,
                    delay.as_secs_f32(),
                    e
                );
                tokio::time::sleep(delay).await;
                last_error = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_error.unwrap_or_else(|| ProviderError::NetworkError {
        detail: "all retries exhausted with no error captured".to_string(),
    }))
}

/// Parse a JSON response body, classifying failures as `ParseError`.
pub(crate) fn parse_json<T>(response_text: &str) -> Result<T, ProviderError>
where
    T: DeserializeOwned,
{
    serde_json::from_str(response_text).map_err(|e| {
        log::error!("JSON parse failed: {e}");
        log::error!("Raw response: {}", truncate_for_log(response_text));
        ProviderError::ParseError {
            detail: e.to_string(),
        }
    })
}

/// Delay before the next attempt.
///
/// `Retry-After` wins when present (capped at 30s); otherwise exponential
/// backoff.
fn retry_delay(error: &ProviderError, attempt: u32) -> Duration {
    if let ProviderError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        backoff_delay(attempt)
    }
}

/// Exponential backoff: 100ms, 200ms, 400ms, ... capped at 10 seconds.
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20); // keep 2^attempt in range
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(10_000))
}
