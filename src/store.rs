use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketLocationConstraint, BucketVersioningStatus, CreateBucketConfiguration,
    PublicAccessBlockConfiguration, VersioningConfiguration,
};

/// Metadata from a head-object call. The ETag is an opaque digest; for
/// single-part uploads it is the quoted MD5 of the body.
#[derive(Debug, Clone)]
pub struct ObjectMeta {
    pub e_tag: Option<String>,
}

/// The slice of the S3 surface the backup touches. Implemented for the
/// real client below and by the in-memory store in the integration tests.
#[async_trait]
pub trait ObjectStore {
    /// `Ok(None)` when the object does not exist; only genuine failures
    /// are errors.
    async fn head_object(&self, bucket: &str, key: &str) -> anyhow::Result<Option<ObjectMeta>>;
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> anyhow::Result<()>;
    async fn bucket_exists(&self, bucket: &str) -> anyhow::Result<bool>;
    async fn create_bucket(&self, bucket: &str, region: &str) -> anyhow::Result<()>;
    async fn bucket_versioned(&self, bucket: &str) -> anyhow::Result<bool>;
    async fn enable_versioning(&self, bucket: &str) -> anyhow::Result<()>;
    async fn block_public_access(&self, bucket: &str) -> anyhow::Result<()>;
}

pub struct S3Store {
    client: aws_sdk_s3::Client,
}

impl S3Store {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn head_object(&self, bucket: &str, key: &str) -> anyhow::Result<Option<ObjectMeta>> {
        match self
            .client
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => Ok(Some(ObjectMeta { e_tag: output.e_tag })),
            Err(err) if err.as_service_error().is_some_and(|e| e.is_not_found()) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> anyhow::Result<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await?;
        Ok(())
    }

    async fn bucket_exists(&self, bucket: &str) -> anyhow::Result<bool> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(err) if err.as_service_error().is_some_and(|e| e.is_not_found()) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn create_bucket(&self, bucket: &str, region: &str) -> anyhow::Result<()> {
        // Creating a bucket in us-east-1 requires that no location
        // constraint be passed.
        let create_bucket_configuration = if region == "us-east-1" {
            None
        } else {
            Some(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(region))
                    .build(),
            )
        };

        self.client
            .create_bucket()
            .set_create_bucket_configuration(create_bucket_configuration)
            .bucket(bucket)
            .send()
            .await?;
        Ok(())
    }

    async fn bucket_versioned(&self, bucket: &str) -> anyhow::Result<bool> {
        let output = self
            .client
            .get_bucket_versioning()
            .bucket(bucket)
            .send()
            .await?;
        Ok(matches!(output.status, Some(BucketVersioningStatus::Enabled)))
    }

    async fn enable_versioning(&self, bucket: &str) -> anyhow::Result<()> {
        self.client
            .put_bucket_versioning()
            .bucket(bucket)
            .versioning_configuration(
                VersioningConfiguration::builder()
                    .status(BucketVersioningStatus::Enabled)
                    .build(),
            )
            .send()
            .await?;
        Ok(())
    }

    async fn block_public_access(&self, bucket: &str) -> anyhow::Result<()> {
        let config = PublicAccessBlockConfiguration::builder()
            .block_public_acls(true)
            .ignore_public_acls(true)
            .block_public_policy(true)
            .restrict_public_buckets(true)
            .build();

        self.client
            .put_public_access_block()
            .bucket(bucket)
            .public_access_block_configuration(config)
            .send()
            .await?;
        Ok(())
    }
}
