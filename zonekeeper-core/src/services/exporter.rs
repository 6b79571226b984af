//! Export document assembly.

use chrono::NaiveDateTime;
use zonekeeper_provider::DnsRecord;

use crate::types::{ExportDocument, ExportInfo, ExportRecord, ProviderAccount, User, ZoneInfo};

/// Pure assembly of the zone export document.
pub struct RecordExporter;

impl RecordExporter {
    #[must_use]
    pub fn build(
        account: &ProviderAccount,
        user: &User,
        records: Vec<DnsRecord>,
    ) -> ExportDocument {
        Self::build_at(account, user, records, chrono::Utc::now().naive_utc())
    }

    /// Like [`build`](Self::build) with an explicit timestamp, for
    /// deterministic tests.
    #[must_use]
    pub fn build_at(
        account: &ProviderAccount,
        user: &User,
        records: Vec<DnsRecord>,
        exported_at: NaiveDateTime,
    ) -> ExportDocument {
        let records: Vec<ExportRecord> = records.into_iter().map(ExportRecord::from).collect();
        ExportDocument {
            zone_info: ZoneInfo {
                zone_name: account.zone_name.clone(),
                zone_id: account.zone_id.clone(),
                email: account.email.clone(),
                total_records: records.len(),
            },
            records,
            export_info: ExportInfo {
                exported_at,
                exported_by: format!("{} ({})", user.display_name(), user.chat_id),
            },
        }
    }
}

/// Attachment filename for an export: `dns_records_{zone}_{YYYYmmdd_HHMMSS}
/// .json`, with anything outside `[A-Za-z0-9_]` in the zone name replaced
/// by `_`.
#[must_use]
pub fn export_filename(zone_name: &str, ts: NaiveDateTime) -> String {
    let safe_zone: String = zone_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    format!("dns_records_{safe_zone}_{}.json", ts.format("%Y%m%d_%H%M%S"))
}
