use anyhow::bail;
use async_trait::async_trait;
use aws_sdk_route53::types::RrType;

use crate::page::Page;
use crate::resource::{AliasTarget, GeoLocation, HostedZone, RecordSet, ResourceRecord};

/// Continuation cursor for the hosted-zone listing.
#[derive(Debug, Clone)]
pub struct ZoneCursor {
    pub dns_name: String,
    pub hosted_zone_id: String,
}

/// Continuation cursor for one zone's record listing.
#[derive(Debug, Clone)]
pub struct RecordCursor {
    pub record_name: String,
    pub record_type: String,
}

/// One page per call over the two Route 53 listing APIs. Pagination policy
/// lives in [`crate::page::fetch_all`]; implementations only translate a
/// single request/response pair.
#[async_trait]
pub trait DnsApi {
    async fn zone_page(
        &self,
        cursor: Option<ZoneCursor>,
    ) -> anyhow::Result<Page<HostedZone, ZoneCursor>>;

    async fn record_page(
        &self,
        zone_id: &str,
        cursor: Option<RecordCursor>,
    ) -> anyhow::Result<Page<RecordSet, RecordCursor>>;
}

pub struct Route53Api {
    client: aws_sdk_route53::Client,
}

impl Route53Api {
    pub fn new(client: aws_sdk_route53::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DnsApi for Route53Api {
    async fn zone_page(
        &self,
        cursor: Option<ZoneCursor>,
    ) -> anyhow::Result<Page<HostedZone, ZoneCursor>> {
        let mut request = self.client.list_hosted_zones_by_name();
        if let Some(cursor) = cursor {
            request = request
                .dns_name(cursor.dns_name)
                .hosted_zone_id(cursor.hosted_zone_id);
        }
        let output = request.send().await?;

        let items = output
            .hosted_zones
            .into_iter()
            .map(|zone| HostedZone {
                id: zone.id,
                name: zone.name,
            })
            .collect();

        let next = if output.is_truncated {
            match (output.next_dns_name, output.next_hosted_zone_id) {
                (Some(dns_name), Some(hosted_zone_id)) => Some(ZoneCursor {
                    dns_name,
                    hosted_zone_id,
                }),
                _ => bail!("truncated hosted zone listing without a continuation cursor"),
            }
        } else {
            None
        };

        Ok(Page { items, next })
    }

    async fn record_page(
        &self,
        zone_id: &str,
        cursor: Option<RecordCursor>,
    ) -> anyhow::Result<Page<RecordSet, RecordCursor>> {
        let mut request = self
            .client
            .list_resource_record_sets()
            .hosted_zone_id(zone_id);
        if let Some(cursor) = cursor {
            request = request
                .start_record_name(cursor.record_name)
                .start_record_type(RrType::from(cursor.record_type.as_str()));
        }
        let output = request.send().await?;

        let items = output
            .resource_record_sets
            .into_iter()
            .map(convert_record_set)
            .collect();

        let next = if output.is_truncated {
            match (output.next_record_name, output.next_record_type) {
                (Some(record_name), Some(record_type)) => Some(RecordCursor {
                    record_name,
                    record_type: record_type.as_str().to_string(),
                }),
                _ => bail!("truncated record listing without a continuation cursor"),
            }
        } else {
            None
        };

        Ok(Page { items, next })
    }
}

fn convert_record_set(record: aws_sdk_route53::types::ResourceRecordSet) -> RecordSet {
    RecordSet {
        name: record.name,
        r#type: record.r#type.as_str().to_string(),
        set_identifier: record.set_identifier,
        weight: record.weight,
        region: record.region.map(|r| r.as_str().to_string()),
        geo_location: record.geo_location.map(|geo| GeoLocation {
            continent_code: geo.continent_code,
            country_code: geo.country_code,
            subdivision_code: geo.subdivision_code,
        }),
        failover: record.failover.map(|f| f.as_str().to_string()),
        multi_value_answer: record.multi_value_answer,
        ttl: record.ttl,
        resource_records: record.resource_records.map(|records| {
            records
                .into_iter()
                .map(|r| ResourceRecord { value: r.value })
                .collect()
        }),
        alias_target: record.alias_target.map(|alias| AliasTarget {
            hosted_zone_id: alias.hosted_zone_id,
            dns_name: alias.dns_name,
            evaluate_target_health: alias.evaluate_target_health,
        }),
        health_check_id: record.health_check_id,
        traffic_policy_instance_id: record.traffic_policy_instance_id,
    }
}
