use anyhow::Context;

use crate::resource::{HostedZone, RecordSet, RecordValue};

pub const CSV_HEADER: [&str; 9] = [
    "NAME",
    "TYPE",
    "VALUE",
    "TTL",
    "REGION",
    "WEIGHT",
    "SETID",
    "FAILOVER",
    "EVALUATE_HEALTH",
];

/// One serialized backup file and the key it will be stored under.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub key: String,
    pub body: Vec<u8>,
}

fn column<T: ToString>(field: Option<T>) -> String {
    field.map(|v| v.to_string()).unwrap_or_default()
}

/// Renders a zone's record set as CSV. One row per (record, value) pair; a
/// record with several values shares every non-VALUE column across its
/// rows. The header is emitted even for a zone with no records. Records
/// with neither an alias target nor plain values produce no rows.
pub fn zone_to_csv(records: &[RecordSet]) -> anyhow::Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for record in records {
        if record.value() == RecordValue::Unrecognized {
            tracing::warn!(
                name = %record.name,
                record_type = %record.r#type,
                "record has neither an alias target nor resource records, skipping"
            );
            continue;
        }

        let ttl = column(record.ttl);
        let region = column(record.region.as_deref());
        let weight = column(record.weight);
        let set_id = column(record.set_identifier.as_deref());
        let failover = column(record.failover.as_deref());
        let evaluate_health = column(
            record
                .alias_target
                .as_ref()
                .map(|alias| alias.evaluate_target_health),
        );

        for value in record.values() {
            writer.write_record([
                record.name.as_str(),
                record.r#type.as_str(),
                value.as_str(),
                ttl.as_str(),
                region.as_str(),
                weight.as_str(),
                set_id.as_str(),
                failover.as_str(),
                evaluate_health.as_str(),
            ])?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing csv writer: {e}"))
}

/// Renders the zone's full record collection as an indented JSON array,
/// the lossless counterpart to the CSV's flattened view.
pub fn zone_to_json(records: &[RecordSet]) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(records).context("serializing zone records as JSON")
}

/// Storage key for one zone artifact:
/// `[prefix/]<timestamp>/<zone name without trailing dot>/<zone name><extension>`.
/// The extension is concatenated directly onto the fully-qualified zone
/// name; its trailing dot doubles as the separator. Existing backups were
/// written this way, so the layout stays.
pub fn object_key(
    prefix: Option<&str>,
    timestamp: &str,
    zone_name: &str,
    extension: &str,
) -> String {
    let key = format!(
        "{timestamp}/{}/{zone_name}{extension}",
        zone_name.trim_end_matches('.')
    );
    match prefix {
        Some(prefix) => format!("{}/{key}", prefix.trim_end_matches('/')),
        None => key,
    }
}

/// The CSV and JSON artifacts for one zone under the run's timestamp.
pub fn zone_artifacts(
    prefix: Option<&str>,
    timestamp: &str,
    zone: &HostedZone,
    records: &[RecordSet],
) -> anyhow::Result<[Artifact; 2]> {
    Ok([
        Artifact {
            key: object_key(prefix, timestamp, &zone.name, "csv"),
            body: zone_to_csv(records)?,
        },
        Artifact {
            key: object_key(prefix, timestamp, &zone.name, "json"),
            body: zone_to_json(records)?,
        },
    ])
}
