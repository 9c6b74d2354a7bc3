use crate::error::BackupError;
use crate::store::ObjectStore;

/// Ensures the destination bucket exists in the desired versioning mode.
///
/// An existing bucket whose versioning state differs from the desired one
/// aborts the run before any data movement: continuing would retroactively
/// change what the uploader's skip check meant for objects already stored.
/// A missing bucket is created, locked down against public access and,
/// when requested, switched to versioned. Creation and lockdown are two
/// separate calls, not a transaction.
pub async fn ensure_bucket<S: ObjectStore>(
    store: &S,
    bucket: &str,
    region: &str,
    desired_versioned: bool,
) -> anyhow::Result<()> {
    if store.bucket_exists(bucket).await? {
        let actual = store.bucket_versioned(bucket).await?;
        if actual != desired_versioned {
            return Err(BackupError::VersioningMismatch {
                bucket: bucket.to_string(),
                actual,
                desired: desired_versioned,
            }
            .into());
        }
        return Ok(());
    }

    tracing::info!(bucket, region, "bucket not found, creating");
    store.create_bucket(bucket, region).await?;
    store.block_public_access(bucket).await?;
    if desired_versioned {
        store.enable_versioning(bucket).await?;
    }

    Ok(())
}
