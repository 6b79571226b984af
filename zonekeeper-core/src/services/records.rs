//! Record CRUD against the active zone.

use log::info;
use zonekeeper_provider::{DnsRecord, NewRecord, UpdateRecord};

use super::exporter::RecordExporter;
use super::ClientFactory;
use crate::error::CoreResult;
use crate::types::{ExportDocument, ProviderAccount, User};

/// Stateless record operations. Each call builds a client from the
/// account's stored credentials; the remote is the source of truth and
/// no compensating rollback is attempted.
pub struct RecordService<'a> {
    factory: &'a dyn ClientFactory,
}

impl<'a> RecordService<'a> {
    #[must_use]
    pub fn new(factory: &'a dyn ClientFactory) -> Self {
        Self { factory }
    }

    /// Fetch every record of the account's zone and assemble the
    /// export document.
    pub async fn export_zone(
        &self,
        account: &ProviderAccount,
        user: &User,
    ) -> CoreResult<ExportDocument> {
        let client = self.factory.make_client(account.credentials());
        let records = client.list_records(&account.zone_id).await?;
        info!(
            "exporting {} record(s) of zone {} for chat {}",
            records.len(),
            account.zone_name,
            user.chat_id
        );
        Ok(RecordExporter::build(account, user, records))
    }

    pub async fn get_record(
        &self,
        account: &ProviderAccount,
        record_id: &str,
    ) -> CoreResult<DnsRecord> {
        let client = self.factory.make_client(account.credentials());
        Ok(client.get_record(&account.zone_id, record_id).await?)
    }

    pub async fn add_record(
        &self,
        account: &ProviderAccount,
        record: &NewRecord,
    ) -> CoreResult<DnsRecord> {
        let client = self.factory.make_client(account.credentials());
        let created = client.create_record(&account.zone_id, record).await?;
        info!(
            "created {} record {} in zone {}",
            created.record_type, created.name, account.zone_name
        );
        Ok(created)
    }

    pub async fn edit_record(
        &self,
        account: &ProviderAccount,
        record_id: &str,
        record: &UpdateRecord,
    ) -> CoreResult<DnsRecord> {
        let client = self.factory.make_client(account.credentials());
        let updated = client
            .update_record(&account.zone_id, record_id, record)
            .await?;
        info!(
            "updated record {record_id} in zone {}",
            account.zone_name
        );
        Ok(updated)
    }

    pub async fn remove_record(
        &self,
        account: &ProviderAccount,
        record_id: &str,
    ) -> CoreResult<()> {
        let client = self.factory.make_client(account.credentials());
        client.delete_record(&account.zone_id, record_id).await?;
        info!(
            "deleted record {record_id} from zone {}",
            account.zone_name
        );
        Ok(())
    }
}
