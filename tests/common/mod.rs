//! In-memory AWS doubles shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use route53_backup::page::Page;
use route53_backup::resource::{AliasTarget, HostedZone, RecordSet, ResourceRecord};
use route53_backup::route53::{DnsApi, RecordCursor, ZoneCursor};
use route53_backup::store::{ObjectMeta, ObjectStore};

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub e_tag: String,
    /// How many versions a versioned bucket would hold for this key.
    pub versions: usize,
}

#[derive(Debug, Clone)]
pub struct FakeBucket {
    pub region: String,
    pub versioned: bool,
    pub public_access_blocked: bool,
}

/// In-memory `ObjectStore` mirroring the slice of S3 the backup touches:
/// single-part ETags are quoted MD5 digests, repeated puts stack versions.
#[derive(Default)]
pub struct FakeStore {
    pub objects: Mutex<HashMap<String, StoredObject>>,
    pub bucket: Mutex<Option<FakeBucket>>,
    pub put_count: AtomicUsize,
    pub create_count: AtomicUsize,
    pub lockdown_count: AtomicUsize,
    pub versioning_writes: AtomicUsize,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket(region: &str, versioned: bool) -> Self {
        let store = Self::default();
        *store.bucket.lock().unwrap() = Some(FakeBucket {
            region: region.to_string(),
            versioned,
            public_access_blocked: true,
        });
        store
    }

    pub fn put_count(&self) -> usize {
        self.put_count.load(Ordering::SeqCst)
    }

    /// Every call that would change bucket or object state.
    pub fn mutating_calls(&self) -> usize {
        self.create_count.load(Ordering::SeqCst)
            + self.lockdown_count.load(Ordering::SeqCst)
            + self.versioning_writes.load(Ordering::SeqCst)
            + self.put_count()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl ObjectStore for FakeStore {
    async fn head_object(&self, _bucket: &str, key: &str) -> anyhow::Result<Option<ObjectMeta>> {
        Ok(self.objects.lock().unwrap().get(key).map(|object| ObjectMeta {
            e_tag: Some(object.e_tag.clone()),
        }))
    }

    async fn put_object(&self, _bucket: &str, key: &str, body: Vec<u8>) -> anyhow::Result<()> {
        self.put_count.fetch_add(1, Ordering::SeqCst);
        let e_tag = format!("\"{:x}\"", md5::compute(&body));
        let mut objects = self.objects.lock().unwrap();
        let versions = objects.get(key).map(|object| object.versions).unwrap_or(0) + 1;
        objects.insert(key.to_string(), StoredObject { body, e_tag, versions });
        Ok(())
    }

    async fn bucket_exists(&self, _bucket: &str) -> anyhow::Result<bool> {
        Ok(self.bucket.lock().unwrap().is_some())
    }

    async fn create_bucket(&self, _bucket: &str, region: &str) -> anyhow::Result<()> {
        self.create_count.fetch_add(1, Ordering::SeqCst);
        *self.bucket.lock().unwrap() = Some(FakeBucket {
            region: region.to_string(),
            versioned: false,
            public_access_blocked: false,
        });
        Ok(())
    }

    async fn bucket_versioned(&self, _bucket: &str) -> anyhow::Result<bool> {
        Ok(self
            .bucket
            .lock()
            .unwrap()
            .as_ref()
            .map(|bucket| bucket.versioned)
            .unwrap_or(false))
    }

    async fn enable_versioning(&self, _bucket: &str) -> anyhow::Result<()> {
        self.versioning_writes.fetch_add(1, Ordering::SeqCst);
        if let Some(bucket) = self.bucket.lock().unwrap().as_mut() {
            bucket.versioned = true;
        }
        Ok(())
    }

    async fn block_public_access(&self, _bucket: &str) -> anyhow::Result<()> {
        self.lockdown_count.fetch_add(1, Ordering::SeqCst);
        if let Some(bucket) = self.bucket.lock().unwrap().as_mut() {
            bucket.public_access_blocked = true;
        }
        Ok(())
    }
}

/// `DnsApi` double serving zones and records from memory in fixed-size
/// pages, resuming from name cursors the way the real listing APIs do.
pub struct FakeDns {
    zones: Vec<HostedZone>,
    records: HashMap<String, Vec<RecordSet>>,
    page_size: usize,
    pub zone_page_calls: AtomicUsize,
    pub record_page_calls: AtomicUsize,
}

impl FakeDns {
    pub fn new(page_size: usize) -> Self {
        Self {
            zones: Vec::new(),
            records: HashMap::new(),
            page_size,
            zone_page_calls: AtomicUsize::new(0),
            record_page_calls: AtomicUsize::new(0),
        }
    }

    pub fn add_zone(&mut self, id: &str, name: &str, records: Vec<RecordSet>) {
        self.zones.push(HostedZone {
            id: id.to_string(),
            name: name.to_string(),
        });
        self.records.insert(id.to_string(), records);
    }

    pub fn zone_page_calls(&self) -> usize {
        self.zone_page_calls.load(Ordering::SeqCst)
    }

    pub fn record_page_calls(&self) -> usize {
        self.record_page_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsApi for FakeDns {
    async fn zone_page(
        &self,
        cursor: Option<ZoneCursor>,
    ) -> anyhow::Result<Page<HostedZone, ZoneCursor>> {
        self.zone_page_calls.fetch_add(1, Ordering::SeqCst);

        let start = match &cursor {
            Some(cursor) => self
                .zones
                .iter()
                .position(|zone| zone.name == cursor.dns_name)
                .ok_or_else(|| anyhow::anyhow!("unknown zone cursor {}", cursor.dns_name))?,
            None => 0,
        };
        let end = (start + self.page_size).min(self.zones.len());

        let next = if end < self.zones.len() {
            Some(ZoneCursor {
                dns_name: self.zones[end].name.clone(),
                hosted_zone_id: self.zones[end].id.clone(),
            })
        } else {
            None
        };

        Ok(Page {
            items: self.zones[start..end].to_vec(),
            next,
        })
    }

    async fn record_page(
        &self,
        zone_id: &str,
        cursor: Option<RecordCursor>,
    ) -> anyhow::Result<Page<RecordSet, RecordCursor>> {
        self.record_page_calls.fetch_add(1, Ordering::SeqCst);

        let records = self
            .records
            .get(zone_id)
            .ok_or_else(|| anyhow::anyhow!("unknown zone {zone_id}"))?;

        let start = match &cursor {
            Some(cursor) => records
                .iter()
                .position(|record| record.name == cursor.record_name)
                .ok_or_else(|| anyhow::anyhow!("unknown record cursor {}", cursor.record_name))?,
            None => 0,
        };
        let end = (start + self.page_size).min(records.len());

        let next = if end < records.len() {
            Some(RecordCursor {
                record_name: records[end].name.clone(),
                record_type: records[end].r#type.clone(),
            })
        } else {
            None
        };

        Ok(Page {
            items: records[start..end].to_vec(),
            next,
        })
    }
}

pub fn a_record(name: &str, ttl: i64, values: &[&str]) -> RecordSet {
    RecordSet {
        name: name.to_string(),
        r#type: "A".to_string(),
        ttl: Some(ttl),
        resource_records: Some(
            values
                .iter()
                .map(|value| ResourceRecord {
                    value: value.to_string(),
                })
                .collect(),
        ),
        ..Default::default()
    }
}

pub fn alias_record(name: &str, target_zone_id: &str, target_dns_name: &str) -> RecordSet {
    RecordSet {
        name: name.to_string(),
        r#type: "A".to_string(),
        alias_target: Some(AliasTarget {
            hosted_zone_id: target_zone_id.to_string(),
            dns_name: target_dns_name.to_string(),
            evaluate_target_health: false,
        }),
        ..Default::default()
    }
}
