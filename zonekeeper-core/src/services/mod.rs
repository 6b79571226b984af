//! Domain services built on top of the provider client.

mod exporter;
mod records;
mod validator;

pub use exporter::{export_filename, RecordExporter};
pub use records::RecordService;
pub use validator::{CredentialValidator, ValidationOutcome};

use std::sync::Arc;

use zonekeeper_provider::{CloudflareCredentials, DnsApi};

/// Constructs provider API clients from credentials.
///
/// A seam so tests can inject mock clients while production builds
/// real HTTP clients with the configured timeouts.
pub trait ClientFactory: Send + Sync {
    fn make_client(&self, credentials: CloudflareCredentials) -> Arc<dyn DnsApi>;
}
