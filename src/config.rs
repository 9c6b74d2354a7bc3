use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::BackupError;

pub const DEFAULT_CONFIG_PATH: &str = "route53-backup.ron";

/// Destination settings for one backup run, passed explicitly to the
/// orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupConfig {
    /// Destination bucket name.
    pub bucket: String,
    /// Region the bucket lives in (only consulted when the bucket has to
    /// be created).
    pub region: String,
    /// Whether the bucket is expected to be versioned. Controls the
    /// uploader's skip-if-unchanged check.
    #[serde(default)]
    pub versioned: bool,
    /// Optional root folder prepended to every object key.
    #[serde(default)]
    pub prefix: Option<String>,
}

impl BackupConfig {
    /// Loads the RON config file if present, falling back to the
    /// environment otherwise.
    pub fn load() -> anyhow::Result<BackupConfig> {
        let config_path = Path::new(DEFAULT_CONFIG_PATH);
        if config_path.is_file() {
            tracing::info!("Loading backup config file at {:?}", config_path);
            let config: BackupConfig = ron::from_str(&std::fs::read_to_string(config_path)?)
                .with_context(|| format!("Failed to parse {DEFAULT_CONFIG_PATH}"))?;
            Ok(config)
        } else {
            tracing::info!("Backup config file at {:?} not present, reading environment.", config_path);
            Self::from_env()
        }
    }

    /// Reads the `S3_BUCKET_*` variables the original deployment of this
    /// tool was driven by. Any non-empty `S3_BUCKET_VERSIONED` counts as
    /// versioned.
    pub fn from_env() -> anyhow::Result<BackupConfig> {
        let bucket = std::env::var("S3_BUCKET_NAME")
            .map_err(|_| BackupError::MissingConfig("S3_BUCKET_NAME"))?;
        let region = std::env::var("S3_BUCKET_REGION")
            .map_err(|_| BackupError::MissingConfig("S3_BUCKET_REGION"))?;
        let versioned = std::env::var("S3_BUCKET_VERSIONED")
            .map(|v| !v.is_empty())
            .unwrap_or(false);
        let prefix = std::env::var("S3_KEY_PREFIX").ok().filter(|p| !p.is_empty());

        Ok(BackupConfig {
            bucket,
            region,
            versioned,
            prefix,
        })
    }
}
