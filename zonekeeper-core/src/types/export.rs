use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use zonekeeper_provider::DnsRecord;

/// Full export document for one zone's DNS records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    pub zone_info: ZoneInfo,
    pub records: Vec<ExportRecord>,
    pub export_info: ExportInfo,
}

/// Zone header of an export document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneInfo {
    pub zone_name: String,
    pub zone_id: String,
    pub email: String,
    pub total_records: usize,
}

/// One DNS record in an export document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
    pub locked: bool,
    pub created_on: String,
    pub modified_on: String,
}

impl From<DnsRecord> for ExportRecord {
    fn from(record: DnsRecord) -> Self {
        Self {
            id: record.id,
            record_type: record.record_type,
            name: record.name,
            content: record.content,
            ttl: record.ttl,
            proxied: record.proxied,
            locked: record.locked,
            created_on: record.created_on.unwrap_or_default(),
            modified_on: record.modified_on.unwrap_or_default(),
        }
    }
}

/// Provenance trailer of an export document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportInfo {
    pub exported_at: NaiveDateTime,
    pub exported_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_record_from_dns_record() {
        let record = DnsRecord {
            id: "r1".into(),
            record_type: "A".into(),
            name: "www.example.com".into(),
            content: "192.0.2.1".into(),
            ttl: 300,
            proxied: true,
            locked: false,
            priority: None,
            created_on: Some("2024-01-01T00:00:00Z".into()),
            modified_on: None,
        };
        let exported = ExportRecord::from(record);
        assert_eq!(exported.record_type, "A");
        assert_eq!(exported.created_on, "2024-01-01T00:00:00Z");
        // Missing timestamps degrade to empty strings, not nulls.
        assert_eq!(exported.modified_on, "");
    }

    #[test]
    fn document_serializes_with_type_key() {
        let doc = ExportDocument {
            zone_info: ZoneInfo {
                zone_name: "example.com".into(),
                zone_id: "z1".into(),
                email: "ops@example.com".into(),
                total_records: 1,
            },
            records: vec![ExportRecord {
                id: "r1".into(),
                record_type: "TXT".into(),
                name: "example.com".into(),
                content: "v=spf1 -all".into(),
                ttl: 1,
                proxied: false,
                locked: false,
                created_on: String::new(),
                modified_on: String::new(),
            }],
            export_info: ExportInfo {
                exported_at: NaiveDateTime::default(),
                exported_by: "alice (42)".into(),
            },
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["records"][0]["type"], "TXT");
        assert_eq!(json["zone_info"]["total_records"], 1);
        assert_eq!(json["export_info"]["exported_by"], "alice (42)");
    }
}
