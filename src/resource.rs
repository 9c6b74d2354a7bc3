use serde::{Deserialize, Serialize};

/// A hosted zone as returned by `ListHostedZonesByName`. The name is fully
/// qualified, trailing dot included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostedZone {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
}

/// Alias record target. Mutually exclusive with plain resource records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasTarget {
    #[serde(rename = "HostedZoneId")]
    pub hosted_zone_id: String,
    #[serde(rename = "DNSName")]
    pub dns_name: String,
    #[serde(rename = "EvaluateTargetHealth")]
    pub evaluate_target_health: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    #[serde(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    #[serde(rename = "ContinentCode", default, skip_serializing_if = "Option::is_none")]
    pub continent_code: Option<String>,
    #[serde(rename = "CountryCode", default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(rename = "SubdivisionCode", default, skip_serializing_if = "Option::is_none")]
    pub subdivision_code: Option<String>,
}

/// Mirror of the Route 53 record set wire shape. The SDK output types do
/// not implement `Serialize`, so the JSON artifact is produced from this
/// model instead; field names match the wire, and absent fields are
/// omitted, keeping the backup comparable with what the listing API
/// actually returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub r#type: String,
    #[serde(rename = "SetIdentifier", default, skip_serializing_if = "Option::is_none")]
    pub set_identifier: Option<String>,
    #[serde(rename = "Weight", default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    #[serde(rename = "Region", default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(rename = "GeoLocation", default, skip_serializing_if = "Option::is_none")]
    pub geo_location: Option<GeoLocation>,
    #[serde(rename = "Failover", default, skip_serializing_if = "Option::is_none")]
    pub failover: Option<String>,
    #[serde(rename = "MultiValueAnswer", default, skip_serializing_if = "Option::is_none")]
    pub multi_value_answer: Option<bool>,
    #[serde(rename = "TTL", default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
    #[serde(rename = "ResourceRecords", default, skip_serializing_if = "Option::is_none")]
    pub resource_records: Option<Vec<ResourceRecord>>,
    #[serde(rename = "AliasTarget", default, skip_serializing_if = "Option::is_none")]
    pub alias_target: Option<AliasTarget>,
    #[serde(rename = "HealthCheckId", default, skip_serializing_if = "Option::is_none")]
    pub health_check_id: Option<String>,
    #[serde(rename = "TrafficPolicyInstanceId", default, skip_serializing_if = "Option::is_none")]
    pub traffic_policy_instance_id: Option<String>,
}

/// The value shape of a record, determined once. Alias and plain records
/// are mutually exclusive; a record carrying neither is `Unrecognized` and
/// left to the caller to warn about.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue<'a> {
    Alias {
        hosted_zone_id: &'a str,
        dns_name: &'a str,
    },
    Plain(&'a [ResourceRecord]),
    Unrecognized,
}

impl RecordSet {
    pub fn value(&self) -> RecordValue<'_> {
        if let Some(alias) = &self.alias_target {
            RecordValue::Alias {
                hosted_zone_id: &alias.hosted_zone_id,
                dns_name: &alias.dns_name,
            }
        } else if let Some(records) = &self.resource_records {
            RecordValue::Plain(records)
        } else {
            RecordValue::Unrecognized
        }
    }

    /// VALUE column entries for this record: `ALIAS:<zone id>:<dns name>`
    /// for an alias record, one entry per plain value otherwise, in server
    /// order.
    pub fn values(&self) -> Vec<String> {
        match self.value() {
            RecordValue::Alias {
                hosted_zone_id,
                dns_name,
            } => vec![format!("ALIAS:{hosted_zone_id}:{dns_name}")],
            RecordValue::Plain(records) => records.iter().map(|r| r.value.clone()).collect(),
            RecordValue::Unrecognized => Vec::new(),
        }
    }
}
