use thiserror::Error;

/// Fatal pre-flight failures. Everything past pre-flight propagates as
/// `anyhow::Error` straight from the SDK call that produced it.
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("missing required configuration: {0}")]
    MissingConfig(&'static str),

    #[error(
        "bucket {bucket} has versioning={actual} but this backup is configured to run with versioning={desired}"
    )]
    VersioningMismatch {
        bucket: String,
        actual: bool,
        desired: bool,
    },
}
