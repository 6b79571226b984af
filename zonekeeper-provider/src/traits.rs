use async_trait::async_trait;

use crate::error::Result;
use crate::types::{DnsRecord, NewRecord, UpdateRecord, Zone};

/// The DNS provider API surface consumed by the rest of the system.
///
/// Implemented by [`CloudflareClient`](crate::CloudflareClient); tests
/// substitute mocks. Every method is a potential long-latency network
/// operation and fails with a classified
/// [`ProviderError`](crate::ProviderError) on any non-success outcome.
#[async_trait]
pub trait DnsApi: Send + Sync {
    /// Confirm the credential triple is authentic.
    async fn verify_credentials(&self) -> Result<()>;

    /// Enumerate the zones owned by the account, in provider order.
    async fn list_zones(&self) -> Result<Vec<Zone>>;

    /// Fetch all DNS records in a zone (all pages).
    async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>>;

    /// Fetch a single DNS record.
    async fn get_record(&self, zone_id: &str, record_id: &str) -> Result<DnsRecord>;

    /// Create a DNS record.
    async fn create_record(&self, zone_id: &str, record: &NewRecord) -> Result<DnsRecord>;

    /// Replace an existing DNS record.
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record: &UpdateRecord,
    ) -> Result<DnsRecord>;

    /// Delete a DNS record.
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()>;
}
