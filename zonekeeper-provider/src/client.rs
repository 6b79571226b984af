//! Cloudflare API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ProviderError, Result};
use crate::http::{execute_request_with_retry, parse_json};
use crate::mapping::{map_api_error, ErrorContext, RawApiError};
use crate::traits::DnsApi;
use crate::types::{
    CloudflareCredentials, CloudflareResponse, DnsRecord, NewRecord, UpdateRecord, Zone,
};

pub(crate) const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// Zones API maximum page size.
pub(crate) const MAX_PAGE_SIZE_ZONES: u32 = 50;
/// DNS Records API maximum page size.
pub(crate) const MAX_PAGE_SIZE_RECORDS: u32 = 100;

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Timeout and retry policy for a [`CloudflareClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Retry bound for transient failures.
    pub max_retries: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Cloudflare DNS API client.
///
/// The sole gateway to the external DNS API: builds authenticated
/// requests, classifies every failure into [`ProviderError`], and applies
/// the configured timeout and retry policy.
pub struct CloudflareClient {
    http: Client,
    credentials: CloudflareCredentials,
    max_retries: u32,
}

impl CloudflareClient {
    /// Create a client with the default timeout/retry policy.
    pub fn new(credentials: CloudflareCredentials) -> Result<Self> {
        Self::with_config(credentials, &ClientConfig::default())
    }

    /// Create a client with an explicit policy.
    pub fn with_config(credentials: CloudflareCredentials, config: &ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ProviderError::NetworkError {
                detail: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            credentials,
            max_retries: config.max_retries,
        })
    }

    /// Create a client around an existing HTTP client, sharing its
    /// connection pool. Timeouts are whatever the pool was built with.
    #[must_use]
    pub fn with_http(http: Client, credentials: CloudflareCredentials, max_retries: u32) -> Self {
        Self {
            http,
            credentials,
            max_retries,
        }
    }

    /// Build a request with the Global API Key auth headers applied.
    fn request_builder(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{CF_API_BASE}{path}"))
            .header("X-Auth-Email", &self.credentials.email)
            .header("X-Auth-Key", self.credentials.api_key.expose())
            .header("Content-Type", "application/json")
    }

    /// Execute a request and unwrap the Cloudflare response envelope.
    ///
    /// Envelope-level failures (`success: false`) are mapped through the
    /// error-code tables; a missing `result` on success is a parse error.
    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&(impl Serialize + Sync)>,
        context: ErrorContext,
    ) -> Result<T> {
        let mut builder = self.request_builder(method.clone(), path);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let (status, text) =
            execute_request_with_retry(builder, method.as_str(), path, self.max_retries).await?;

        let envelope: CloudflareResponse<T> = parse_json(&text)?;

        if !envelope.success {
            let raw = envelope
                .errors
                .as_ref()
                .and_then(|errors| errors.first())
                .map_or_else(
                    || RawApiError::new("Unknown error", status),
                    |e| RawApiError::with_code(e.code.to_string(), e.message.clone(), status),
                );
            let err = map_api_error(raw, context);
            if err.is_expected() {
                log::warn!("API error on {path}: {err}");
            } else {
                log::error!("API error on {path}: {err}");
            }
            return Err(err);
        }

        envelope.result.ok_or_else(|| ProviderError::ParseError {
            detail: "response is missing the result field".to_string(),
        })
    }

    /// Execute a paginated GET, concatenating all pages.
    async fn call_paginated<T: DeserializeOwned>(
        &self,
        path_base: &str,
        per_page: u32,
        context: ErrorContext,
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1_u32;

        loop {
            let sep = if path_base.contains('?') { '&' } else { '?' };
            let path = format!("{path_base}{sep}page={page}&per_page={per_page}");
            let builder = self.request_builder(Method::GET, &path);
            let (status, text) =
                execute_request_with_retry(builder, "GET", &path, self.max_retries).await?;

            let envelope: CloudflareResponse<Vec<T>> = parse_json(&text)?;

            if !envelope.success {
                let raw = envelope
                    .errors
                    .as_ref()
                    .and_then(|errors| errors.first())
                    .map_or_else(
                        || RawApiError::new("Unknown error", status),
                        |e| RawApiError::with_code(e.code.to_string(), e.message.clone(), status),
                    );
                return Err(map_api_error(raw, context));
            }

            items.extend(envelope.result.unwrap_or_default());

            let Some(info) = envelope.result_info else {
                break;
            };
            if info.page >= info.total_pages {
                break;
            }
            page = info.page + 1;
        }

        Ok(items)
    }
}

#[async_trait]
impl DnsApi for CloudflareClient {
    async fn verify_credentials(&self) -> Result<()> {
        // GET /user validates the email/key pair; the account id is
        // validated implicitly by the scoped zone listing.
        let _: serde_json::Value = self
            .call(Method::GET, "/user", None::<&()>, ErrorContext::default())
            .await?;
        Ok(())
    }

    async fn list_zones(&self) -> Result<Vec<Zone>> {
        let path = format!("/zones?account.id={}", self.credentials.account_id);
        let zones = self
            .call_paginated(&path, MAX_PAGE_SIZE_ZONES, ErrorContext::default())
            .await?;
        log::info!("Fetched {} zones", zones.len());
        Ok(zones)
    }

    async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>> {
        let path = format!("/zones/{zone_id}/dns_records");
        let context = ErrorContext {
            zone: Some(zone_id.to_string()),
            ..ErrorContext::default()
        };
        let records: Vec<DnsRecord> = self
            .call_paginated(&path, MAX_PAGE_SIZE_RECORDS, context)
            .await?;
        log::info!("Fetched {} records for zone {zone_id}", records.len());
        Ok(records)
    }

    async fn get_record(&self, zone_id: &str, record_id: &str) -> Result<DnsRecord> {
        let context = ErrorContext {
            record_id: Some(record_id.to_string()),
            zone: Some(zone_id.to_string()),
            ..ErrorContext::default()
        };
        self.call(
            Method::GET,
            &format!("/zones/{zone_id}/dns_records/{record_id}"),
            None::<&()>,
            context,
        )
        .await
    }

    async fn create_record(&self, zone_id: &str, record: &NewRecord) -> Result<DnsRecord> {
        let context = ErrorContext {
            record_name: Some(record.name.clone()),
            zone: Some(zone_id.to_string()),
            ..ErrorContext::default()
        };
        let created: DnsRecord = self
            .call(
                Method::POST,
                &format!("/zones/{zone_id}/dns_records"),
                Some(record),
                context,
            )
            .await?;
        log::info!("Created record {} in zone {zone_id}", created.id);
        Ok(created)
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record: &UpdateRecord,
    ) -> Result<DnsRecord> {
        let context = ErrorContext {
            record_name: Some(record.name.clone()),
            record_id: Some(record_id.to_string()),
            zone: Some(zone_id.to_string()),
        };
        let updated: DnsRecord = self
            .call(
                Method::PUT,
                &format!("/zones/{zone_id}/dns_records/{record_id}"),
                Some(record),
                context,
            )
            .await?;
        log::info!("Updated record {record_id} in zone {zone_id}");
        Ok(updated)
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        let context = ErrorContext {
            record_id: Some(record_id.to_string()),
            zone: Some(zone_id.to_string()),
            ..ErrorContext::default()
        };
        let _: serde_json::Value = self
            .call(
                Method::DELETE,
                &format!("/zones/{zone_id}/dns_records/{record_id}"),
                None::<&()>,
                context,
            )
            .await?;
        log::info!("Deleted record {record_id} from zone {zone_id}");
        Ok(())
    }
}
