//! Application bootstrap for zonekeeper.
//!
//! Wires the SQLite store, the production HTTP client factory, and the
//! core engine into an `AppState` a chat frontend drives.

pub mod config;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use log::info;
use zonekeeper_core::{AccountStore, ClientFactory, CoreResult, Engine};
use zonekeeper_provider::{ClientConfig, CloudflareClient, CloudflareCredentials, DnsApi};

pub use config::AppConfig;
pub use store::SqliteStore;

/// Production client factory: one shared HTTP connection pool, a
/// per-account `CloudflareClient` on top of it.
pub struct HttpClientFactory {
    http: reqwest::Client,
    max_retries: u32,
}

impl HttpClientFactory {
    pub fn new(config: &ClientConfig) -> CoreResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| {
                zonekeeper_core::CoreError::Provider(zonekeeper_provider::ProviderError::NetworkError {
                    detail: format!("failed to build HTTP client: {e}"),
                })
            })?;
        Ok(Self {
            http,
            max_retries: config.max_retries,
        })
    }
}

impl ClientFactory for HttpClientFactory {
    fn make_client(&self, credentials: CloudflareCredentials) -> Arc<dyn DnsApi> {
        Arc::new(CloudflareClient::with_http(
            self.http.clone(),
            credentials,
            self.max_retries,
        ))
    }
}

/// Everything a chat frontend needs, constructed once at startup.
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<SqliteStore>,
    pub engine: Engine,
}

impl AppState {
    pub async fn new(config: AppConfig) -> CoreResult<Self> {
        let store = Arc::new(SqliteStore::new(&config.database_path).await?);

        let client_config = ClientConfig {
            request_timeout_secs: config.request_timeout_secs,
            max_retries: config.max_retries,
            ..ClientConfig::default()
        };
        let factory = Arc::new(HttpClientFactory::new(&client_config)?);

        let engine = Engine::new(
            Arc::clone(&store) as Arc<dyn AccountStore>,
            factory as Arc<dyn ClientFactory>,
            Duration::from_secs(config.session_timeout_secs),
        );

        info!(
            "zonekeeper started, database at {}",
            config.database_path.display()
        );
        Ok(Self {
            config,
            store,
            engine,
        })
    }
}
