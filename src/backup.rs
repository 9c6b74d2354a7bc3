use anyhow::Context;
use chrono::Utc;

use crate::bucket::ensure_bucket;
use crate::config::BackupConfig;
use crate::page::fetch_all;
use crate::route53::DnsApi;
use crate::serialize::zone_artifacts;
use crate::store::ObjectStore;
use crate::upload::upload;

/// Format of the timestamp token shared by every object key of one run.
pub const RUN_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// One backup run: provision the bucket, then list, serialize and upload
/// every hosted zone under a single timestamp prefix.
pub struct Backup<'a, D, S> {
    dns: &'a D,
    store: &'a S,
    config: BackupConfig,
}

impl<'a, D: DnsApi, S: ObjectStore> Backup<'a, D, S> {
    pub fn new(dns: &'a D, store: &'a S, config: BackupConfig) -> Self {
        Self { dns, store, config }
    }

    /// Returns the number of zones backed up. The first failure halts the
    /// run; zones after it are never attempted.
    pub async fn run(&self) -> anyhow::Result<usize> {
        // Formatted once so all artifacts of the run share one prefix.
        let timestamp = Utc::now().format(RUN_TIMESTAMP_FORMAT).to_string();

        ensure_bucket(
            self.store,
            &self.config.bucket,
            &self.config.region,
            self.config.versioned,
        )
        .await?;

        let zones = fetch_all(|cursor| self.dns.zone_page(cursor))
            .await
            .context("listing hosted zones")?;

        tracing::info!(
            "Backing up {} hosted zones to {}/{}",
            zones.len(),
            self.config.bucket,
            timestamp
        );

        for zone in &zones {
            let records = fetch_all(|cursor| self.dns.record_page(&zone.id, cursor))
                .await
                .with_context(|| format!("listing records of zone {}", zone.name))?;

            let artifacts =
                zone_artifacts(self.config.prefix.as_deref(), &timestamp, zone, &records)?;
            for artifact in artifacts {
                let outcome = upload(
                    self.store,
                    &self.config.bucket,
                    &artifact.key,
                    artifact.body,
                    self.config.versioned,
                )
                .await
                .with_context(|| format!("uploading {}", artifact.key))?;
                tracing::debug!(key = %artifact.key, ?outcome, "artifact stored");
            }
        }

        Ok(zones.len())
    }
}
