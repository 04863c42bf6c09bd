//! In-memory stores.
//!
//! Used by the `memory` backend for local development and by the test
//! suites. Each store counts the calls it receives and can be told to fail
//! specific operations, so callers can assert both on outcomes and on
//! "no upstream call was made".

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value, json};
use tokio::sync::RwLock;

use mediahub_core::error::AppError;
use mediahub_core::result::AppResult;
use mediahub_core::traits::{CmsMirror, ObjectFolder, ObjectStore, RecordStore};
use mediahub_core::types::RecordId;

fn bump(counter: &AtomicUsize) {
    counter.fetch_add(1, Ordering::SeqCst);
}

fn read(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}

fn not_found(store: &str, what: &str) -> AppError {
    AppError::upstream(format!("{store} API error: 404 - {what} not found"))
}

fn injected(store: &str) -> AppError {
    AppError::upstream(format!("{store} API error: 500 - injected failure"))
}

// ── Record store ──────────────────────────────────────────────────

/// Snapshot of the calls a [`MemoryRecordStore`] has received.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordStoreCalls {
    pub list: usize,
    pub get: usize,
    pub create: usize,
    pub update: usize,
    pub delete: usize,
    pub list_folders: usize,
}

#[derive(Debug, Default)]
struct RecordCounters {
    list: AtomicUsize,
    get: AtomicUsize,
    create: AtomicUsize,
    update: AtomicUsize,
    delete: AtomicUsize,
    list_folders: AtomicUsize,
}

/// Record store holding rows in process memory.
#[derive(Debug)]
pub struct MemoryRecordStore {
    records: RwLock<Vec<Value>>,
    /// `None` behaves like a missing folders table.
    folders: RwLock<Option<Vec<Value>>>,
    next_id: AtomicI64,
    failing_ids: HashSet<String>,
    fail_listing: bool,
    configured: bool,
    counters: RecordCounters,
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRecordStore {
    /// An empty, configured store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            folders: RwLock::new(Some(Vec::new())),
            next_id: AtomicI64::new(1),
            failing_ids: HashSet::new(),
            fail_listing: false,
            configured: true,
            counters: RecordCounters::default(),
        }
    }

    /// A store that reports the missing-API-key configuration error.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    /// Seed file records. Numeric ids advance the id sequence.
    pub fn with_records(mut self, records: Vec<Value>) -> Self {
        let max = records
            .iter()
            .filter_map(|r| r.get("id").and_then(Value::as_i64))
            .max()
            .unwrap_or(0);
        self.next_id = AtomicI64::new(max.max(self.next_id.load(Ordering::SeqCst) - 1) + 1);
        self.records = RwLock::new(records);
        self
    }

    /// Seed folder rows.
    pub fn with_folders(mut self, folders: Vec<Value>) -> Self {
        self.folders = RwLock::new(Some(folders));
        self
    }

    /// Behave as if the folders table does not exist.
    pub fn without_folders_table(mut self) -> Self {
        self.folders = RwLock::new(None);
        self
    }

    /// Make get/update/delete of this id fail with an upstream error.
    pub fn failing_on(mut self, id: impl Into<RecordId>) -> Self {
        self.failing_ids.insert(id.into().to_string());
        self
    }

    /// Make `list_records` fail with an upstream error.
    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Calls received so far.
    pub fn calls(&self) -> RecordStoreCalls {
        let c = &self.counters;
        RecordStoreCalls {
            list: read(&c.list),
            get: read(&c.get),
            create: read(&c.create),
            update: read(&c.update),
            delete: read(&c.delete),
            list_folders: read(&c.list_folders),
        }
    }

    /// Current rows.
    pub async fn snapshot(&self) -> Vec<Value> {
        self.records.read().await.clone()
    }

    fn check_failure(&self, id: &RecordId) -> AppResult<()> {
        if self.failing_ids.contains(&id.to_string()) {
            return Err(injected("Xano"));
        }
        Ok(())
    }

    fn position(records: &[Value], id: &RecordId) -> Option<usize> {
        records.iter().position(|r| {
            r.get("id")
                .and_then(RecordId::from_json)
                .is_some_and(|rid| rid.same_as(id))
        })
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    fn ensure_configured(&self) -> AppResult<()> {
        if !self.configured {
            return Err(AppError::configuration(
                "XANO_API_KEY environment variable not configured",
            ));
        }
        Ok(())
    }

    async fn list_records(&self) -> AppResult<Vec<Value>> {
        bump(&self.counters.list);
        if self.fail_listing {
            return Err(injected("Xano"));
        }
        Ok(self.records.read().await.clone())
    }

    async fn get_record(&self, id: &RecordId) -> AppResult<Option<Value>> {
        bump(&self.counters.get);
        self.check_failure(id)?;
        let records = self.records.read().await;
        Ok(Self::position(&records, id).map(|i| records[i].clone()))
    }

    async fn create_record(&self, fields: &Map<String, Value>) -> AppResult<Value> {
        bump(&self.counters.create);
        let mut row = fields.clone();
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        row.insert("id".to_string(), Value::from(id));
        row.entry("created_at")
            .or_insert_with(|| Value::from(Utc::now().timestamp_millis()));
        let row = Value::Object(row);
        self.records.write().await.push(row.clone());
        Ok(row)
    }

    async fn update_record(&self, id: &RecordId, fields: &Map<String, Value>) -> AppResult<Value> {
        bump(&self.counters.update);
        self.check_failure(id)?;
        let mut records = self.records.write().await;
        let idx = Self::position(&records, id).ok_or_else(|| not_found("Xano", "record"))?;
        if let Value::Object(row) = &mut records[idx] {
            for (key, value) in fields {
                if key != "id" {
                    row.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(records[idx].clone())
    }

    async fn delete_record(&self, id: &RecordId) -> AppResult<()> {
        bump(&self.counters.delete);
        self.check_failure(id)?;
        let mut records = self.records.write().await;
        let idx = Self::position(&records, id).ok_or_else(|| not_found("Xano", "record"))?;
        records.remove(idx);
        Ok(())
    }

    async fn list_folders(&self) -> AppResult<Vec<Value>> {
        bump(&self.counters.list_folders);
        Ok(self.folders.read().await.clone().unwrap_or_default())
    }
}

// ── Object store ──────────────────────────────────────────────────

/// Snapshot of the calls a [`MemoryObjectStore`] has received.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectStoreCalls {
    pub create_folder: usize,
    pub delete_folder: usize,
    pub count_resources: usize,
    pub list_folders: usize,
}

#[derive(Debug, Default)]
struct ObjectCounters {
    create_folder: AtomicUsize,
    delete_folder: AtomicUsize,
    count_resources: AtomicUsize,
    list_folders: AtomicUsize,
}

/// Object store folder namespace held in process memory.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    folders: RwLock<BTreeSet<String>>,
    resources: HashMap<String, u64>,
    fail_creates: bool,
    counters: ObjectCounters,
}

impl MemoryObjectStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a folder (and its ancestors).
    pub fn with_folder(mut self, path: &str) -> Self {
        let folders = self.folders.get_mut();
        for ancestor in ancestors(path) {
            folders.insert(ancestor);
        }
        self
    }

    /// Pretend `count` resources live directly in `path`.
    pub fn with_resources(mut self, path: &str, count: u64) -> Self {
        self.resources.insert(path.trim_matches('/').to_string(), count);
        self.with_folder(path)
    }

    /// Make `create_folder` fail with an upstream error.
    pub fn failing_creates(mut self) -> Self {
        self.fail_creates = true;
        self
    }

    /// Calls received so far.
    pub fn calls(&self) -> ObjectStoreCalls {
        let c = &self.counters;
        ObjectStoreCalls {
            create_folder: read(&c.create_folder),
            delete_folder: read(&c.delete_folder),
            count_resources: read(&c.count_resources),
            list_folders: read(&c.list_folders),
        }
    }

    /// Whether a folder currently exists.
    pub async fn has_folder(&self, path: &str) -> bool {
        self.folders.read().await.contains(path.trim_matches('/'))
    }
}

fn ancestors(path: &str) -> Vec<String> {
    let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
    (1..=parts.len()).map(|n| parts[..n].join("/")).collect()
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn create_folder(&self, path: &str) -> AppResult<()> {
        bump(&self.counters.create_folder);
        if self.fail_creates {
            return Err(injected("Cloudinary"));
        }
        let mut folders = self.folders.write().await;
        for ancestor in ancestors(path) {
            folders.insert(ancestor);
        }
        Ok(())
    }

    async fn delete_folder(&self, path: &str) -> AppResult<()> {
        bump(&self.counters.delete_folder);
        let path = path.trim_matches('/');
        let mut folders = self.folders.write().await;
        if !folders.remove(path) {
            return Err(not_found("Cloudinary", "folder"));
        }
        let prefix = format!("{path}/");
        folders.retain(|f| !f.starts_with(&prefix));
        Ok(())
    }

    async fn count_resources(&self, path: &str) -> AppResult<u64> {
        bump(&self.counters.count_resources);
        Ok(self
            .resources
            .get(path.trim_matches('/'))
            .copied()
            .unwrap_or(0))
    }

    async fn list_folders(&self, parent: Option<&str>) -> AppResult<Vec<ObjectFolder>> {
        bump(&self.counters.list_folders);
        let parent = parent.map(|p| p.trim_matches('/')).unwrap_or_default();
        let depth = if parent.is_empty() {
            1
        } else {
            parent.split('/').count() + 1
        };
        let prefix = if parent.is_empty() {
            String::new()
        } else {
            format!("{parent}/")
        };
        Ok(self
            .folders
            .read()
            .await
            .iter()
            .filter(|f| f.starts_with(&prefix) && f.split('/').count() == depth)
            .map(|f| ObjectFolder {
                name: f.rsplit('/').next().unwrap_or_default().to_string(),
                path: f.clone(),
            })
            .collect())
    }
}

// ── CMS mirror ────────────────────────────────────────────────────

/// Snapshot of the calls a [`MemoryCmsMirror`] has received.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CmsMirrorCalls {
    pub find: usize,
    pub create: usize,
    pub delete: usize,
    pub publish_item: usize,
    pub publish_site: usize,
}

#[derive(Debug, Default)]
struct MirrorCounters {
    find: AtomicUsize,
    create: AtomicUsize,
    delete: AtomicUsize,
    publish_item: AtomicUsize,
    publish_site: AtomicUsize,
}

/// CMS collection held in process memory.
#[derive(Debug)]
pub struct MemoryCmsMirror {
    items: RwLock<Vec<(String, Map<String, Value>)>>,
    next_id: AtomicUsize,
    configured: bool,
    fail_writes: bool,
    counters: MirrorCounters,
}

impl Default for MemoryCmsMirror {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCmsMirror {
    /// An empty, configured mirror.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            next_id: AtomicUsize::new(1),
            configured: true,
            fail_writes: false,
            counters: MirrorCounters::default(),
        }
    }

    /// A mirror that reports missing configuration.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    /// Make create/delete/publish fail with an upstream error.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Calls received so far.
    pub fn calls(&self) -> CmsMirrorCalls {
        let c = &self.counters;
        CmsMirrorCalls {
            find: read(&c.find),
            create: read(&c.create),
            delete: read(&c.delete),
            publish_item: read(&c.publish_item),
            publish_site: read(&c.publish_site),
        }
    }

    /// Current items as `{id, fieldData}` objects.
    pub async fn items(&self) -> Vec<Value> {
        self.items
            .read()
            .await
            .iter()
            .map(|(id, fields)| json!({ "id": id, "fieldData": fields }))
            .collect()
    }

    fn check_writes(&self) -> AppResult<()> {
        if self.fail_writes {
            return Err(injected("Webflow"));
        }
        Ok(())
    }
}

#[async_trait]
impl CmsMirror for MemoryCmsMirror {
    fn ensure_configured(&self) -> AppResult<()> {
        if !self.configured {
            return Err(AppError::configuration("Webflow configuration missing"));
        }
        Ok(())
    }

    async fn list_items(&self) -> AppResult<Vec<Value>> {
        Ok(self.items().await)
    }

    async fn find_item_by_file_id(&self, file_id: &RecordId) -> AppResult<Option<String>> {
        bump(&self.counters.find);
        Ok(self
            .items
            .read()
            .await
            .iter()
            .find(|(_, fields)| {
                fields
                    .get("file-id")
                    .and_then(RecordId::from_json)
                    .is_some_and(|id| id.same_as(file_id))
            })
            .map(|(id, _)| id.clone()))
    }

    async fn create_item(&self, field_data: &Map<String, Value>) -> AppResult<String> {
        bump(&self.counters.create);
        self.check_writes()?;
        let id = format!("item_{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.items
            .write()
            .await
            .push((id.clone(), field_data.clone()));
        Ok(id)
    }

    async fn delete_item(&self, item_id: &str) -> AppResult<()> {
        bump(&self.counters.delete);
        self.check_writes()?;
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|(id, _)| id != item_id);
        if items.len() == before {
            return Err(not_found("Webflow", "item"));
        }
        Ok(())
    }

    async fn publish_item(&self, _item_id: &str) -> AppResult<()> {
        bump(&self.counters.publish_item);
        self.check_writes()
    }

    async fn publish_site(&self) -> AppResult<()> {
        bump(&self.counters.publish_site);
        self.check_writes()
    }
}
