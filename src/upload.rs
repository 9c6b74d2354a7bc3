use crate::store::ObjectStore;

/// What the uploader did with one artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded,
    /// The stored object already holds these exact bytes; no new version
    /// was created.
    Skipped,
}

/// Quoted MD5 hex digest, the form S3 reports as the ETag of a
/// single-part object.
fn content_etag(body: &[u8]) -> String {
    format!("\"{:x}\"", md5::compute(body))
}

/// Writes one artifact. Against an unversioned bucket this is a plain
/// overwrite. Against a versioned bucket the write is skipped when the
/// stored ETag matches the local digest, so re-running a backup of an
/// unchanged zone does not stack identical versions. The comparison is
/// best-effort: the ETag of a multipart upload is not a content digest,
/// and such objects always re-upload.
pub async fn upload<S: ObjectStore>(
    store: &S,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
    versioned: bool,
) -> anyhow::Result<UploadOutcome> {
    if versioned {
        if let Some(meta) = store.head_object(bucket, key).await? {
            let local_etag = content_etag(&body);
            if meta.e_tag.as_deref() == Some(local_etag.as_str()) {
                tracing::debug!(key, "object content unchanged, skipping upload");
                return Ok(UploadOutcome::Skipped);
            }
        }
    }

    store.put_object(bucket, key, body).await?;
    Ok(UploadOutcome::Uploaded)
}
