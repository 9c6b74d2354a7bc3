use std::time::Duration;

use aws_config::{
    BehaviorVersion, meta::region::RegionProviderChain, retry::RetryConfig, timeout::TimeoutConfig,
};
use aws_sdk_route53::config::Region;
use tracing_subscriber::EnvFilter;

use route53_backup::backup::Backup;
use route53_backup::config::BackupConfig;
use route53_backup::route53::Route53Api;
use route53_backup::store::S3Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = BackupConfig::load()?;

    let timeouts = TimeoutConfig::builder()
        .connect_timeout(Duration::from_secs(30))
        .operation_timeout(Duration::from_secs(30))
        .operation_attempt_timeout(Duration::from_secs(30))
        .read_timeout(Duration::from_secs(30))
        .build();

    let route53_config = aws_config::defaults(BehaviorVersion::latest())
        .region(RegionProviderChain::default_provider().or_else(Region::new("us-east-1")))
        .retry_config(RetryConfig::standard().with_max_attempts(10))
        .timeout_config(timeouts.clone())
        .load()
        .await;

    // Bucket-level calls go through us-east-1; the bucket's own region only
    // matters as a location constraint at creation time.
    let s3_config = aws_config::defaults(BehaviorVersion::latest())
        .region(RegionProviderChain::first_try(Region::new("us-east-1")))
        .timeout_config(timeouts)
        .load()
        .await;

    let dns = Route53Api::new(aws_sdk_route53::Client::new(&route53_config));
    let store = S3Store::new(aws_sdk_s3::Client::new(&s3_config));

    let zones = Backup::new(&dns, &store, config).run().await?;
    tracing::info!("Backed up {zones} hosted zones");
    Ok(())
}
