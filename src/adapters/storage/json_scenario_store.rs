//! JSON Scenario Store Adapter
//!
//! Serves scenarios from a JSON array document on disk. The parsed
//! catalog is held behind an `Arc` and swapped whole on reload or add, so
//! a reader never observes a half-updated set.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::foundation::ScenarioId;
use crate::domain::scenario::{Scenario, ScenarioError, ScenarioSummary};
use crate::ports::{ScenarioStore, ScenarioStoreError};

/// Immutable, indexed view of one version of the document.
#[derive(Debug, Default)]
pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
    index: HashMap<ScenarioId, usize>,
}

impl ScenarioCatalog {
    /// Parses the document text.
    ///
    /// Records without a usable id, records that do not deserialize, and
    /// repeats of an id already seen are skipped with a warning.
    pub fn parse(text: &str) -> Result<Self, ScenarioStoreError> {
        let records = parse_records(text)?;
        Ok(Self::from_records(records))
    }

    fn from_records(records: Vec<Value>) -> Self {
        let mut catalog = ScenarioCatalog::default();

        for (position, mut record) in records.into_iter().enumerate() {
            if !normalize_id(&mut record) {
                tracing::warn!(position, "Skipping scenario record without an id");
                continue;
            }

            let scenario: Scenario = match serde_json::from_value(record) {
                Ok(scenario) => scenario,
                Err(e) => {
                    tracing::warn!(position, error = %e, "Skipping malformed scenario record");
                    continue;
                }
            };

            if catalog.index.contains_key(&scenario.id) {
                tracing::warn!(
                    position,
                    scenario_id = %scenario.id,
                    "Skipping duplicate scenario id; first occurrence wins"
                );
                continue;
            }

            catalog
                .index
                .insert(scenario.id.clone(), catalog.scenarios.len());
            catalog.scenarios.push(scenario);
        }

        catalog
    }

    pub fn get(&self, id: &ScenarioId) -> Option<&Scenario> {
        self.index.get(id).and_then(|&i| self.scenarios.get(i))
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

fn parse_records(text: &str) -> Result<Vec<Value>, ScenarioStoreError> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(records)) => Ok(records),
        Ok(_) => Err(ScenarioStoreError::Parse(
            "expected a JSON array of scenarios".to_string(),
        )),
        Err(e) => Err(ScenarioStoreError::Parse(e.to_string())),
    }
}

/// Numeric ids are accepted and stored as strings.
fn normalize_id(record: &mut Value) -> bool {
    let Some(object) = record.as_object_mut() else {
        return false;
    };
    let id = match object.get("id") {
        Some(Value::String(s)) if ScenarioId::new(s).is_ok() => return true,
        Some(Value::Number(n)) => n.to_string(),
        _ => return false,
    };
    object.insert("id".to_string(), Value::String(id));
    true
}

/// File-backed scenario store
#[derive(Debug)]
pub struct JsonScenarioStore {
    path: PathBuf,
    catalog: RwLock<Arc<ScenarioCatalog>>,
    /// Serializes document rewrites.
    write_lock: Mutex<()>,
}

impl JsonScenarioStore {
    /// Loads the document at `path`.
    ///
    /// A missing file yields an empty store; a present but unreadable or
    /// malformed file is an error.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioStoreError> {
        let path = path.as_ref().to_path_buf();
        let catalog = if fs::try_exists(&path).await.unwrap_or(false) {
            Self::read_catalog(&path).await?
        } else {
            tracing::warn!(path = %path.display(), "Scenario document not found; starting empty");
            ScenarioCatalog::default()
        };

        tracing::info!(path = %path.display(), scenarios = catalog.len(), "Scenarios loaded");
        Ok(Self {
            path,
            catalog: RwLock::new(Arc::new(catalog)),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_catalog(path: &Path) -> Result<ScenarioCatalog, ScenarioStoreError> {
        let text = fs::read_to_string(path)
            .await
            .map_err(|e| ScenarioStoreError::Io(format!("{}: {}", path.display(), e)))?;
        ScenarioCatalog::parse(&text)
    }

    fn snapshot(&self) -> Arc<ScenarioCatalog> {
        match self.catalog.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    fn swap(&self, catalog: ScenarioCatalog) {
        let catalog = Arc::new(catalog);
        match self.catalog.write() {
            Ok(mut guard) => *guard = catalog,
            Err(poisoned) => *poisoned.into_inner() = catalog,
        }
    }

    /// Writes next to the document and renames over it.
    async fn write_document(&self, records: &[Value]) -> Result<(), ScenarioStoreError> {
        let body = serde_json::to_string_pretty(records)
            .map_err(|e| ScenarioStoreError::Parse(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ScenarioStoreError::Io(e.to_string()))?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, body)
            .await
            .map_err(|e| ScenarioStoreError::Io(format!("{}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| ScenarioStoreError::Io(format!("{}: {}", self.path.display(), e)))
    }
}

#[async_trait]
impl ScenarioStore for JsonScenarioStore {
    async fn get(&self, id: &ScenarioId) -> Result<Scenario, ScenarioStoreError> {
        self.snapshot()
            .get(id)
            .cloned()
            .ok_or_else(|| ScenarioStoreError::not_found(id))
    }

    async fn list(&self) -> Vec<ScenarioSummary> {
        self.snapshot()
            .scenarios()
            .iter()
            .map(Scenario::summary)
            .collect()
    }

    async fn export(&self) -> Vec<Scenario> {
        self.snapshot().scenarios().to_vec()
    }

    async fn count(&self) -> usize {
        self.snapshot().len()
    }

    async fn add(&self, scenario: Scenario) -> Result<(), ScenarioStoreError> {
        scenario.validate_complete()?;

        let _guard = self.write_lock.lock().await;

        // Start from the file so records this service skips are kept.
        let mut records = if fs::try_exists(&self.path).await.unwrap_or(false) {
            let text = fs::read_to_string(&self.path)
                .await
                .map_err(|e| ScenarioStoreError::Io(e.to_string()))?;
            parse_records(&text)?
        } else {
            Vec::new()
        };

        let current = ScenarioCatalog::from_records(records.clone());
        if current.get(&scenario.id).is_some() {
            return Err(ScenarioError::AlreadyExists(scenario.id).into());
        }

        let record =
            serde_json::to_value(&scenario).map_err(|e| ScenarioStoreError::Parse(e.to_string()))?;
        records.push(record);
        self.write_document(&records).await?;

        let id = scenario.id.clone();
        let mut next = current;
        next.index.insert(scenario.id.clone(), next.scenarios.len());
        next.scenarios.push(scenario);
        self.swap(next);

        tracing::info!(scenario_id = %id, path = %self.path.display(), "Scenario added");
        Ok(())
    }

    async fn reload(&self) -> Result<usize, ScenarioStoreError> {
        let _guard = self.write_lock.lock().await;

        match Self::read_catalog(&self.path).await {
            Ok(catalog) => {
                let count = catalog.len();
                self.swap(catalog);
                tracing::info!(scenarios = count, "Scenarios reloaded");
                Ok(count)
            }
            Err(e) => {
                tracing::error!(error = %e, "Scenario reload failed; keeping previous catalog");
                Err(e)
            }
        }
    }
}
