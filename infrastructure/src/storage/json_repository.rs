//! JSON file preference store
//!
//! The whole store is one document:
//!
//! ```json
//! { "version": 1, "groups": { "G1": [ { "budget": 3000.0, ... } ] } }
//! ```
//!
//! Every write rewrites the document into a sibling temp file and renames it
//! over the original, so readers never observe a half-written store.

use async_trait::async_trait;
use packvote_application::ports::preference_repository::{PreferenceRepository, RepositoryError};
use packvote_domain::{GroupId, Preference};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

const STORE_VERSION: u32 = 1;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    version: u32,
    #[serde(default)]
    groups: BTreeMap<GroupId, Vec<Preference>>,
}

/// File-backed store keyed by group id
pub struct JsonPreferenceRepository {
    path: PathBuf,
    // Read-modify-write cycles of this process run one at a time
    write_lock: Mutex<()>,
}

impl JsonPreferenceRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<StoreDocument, RepositoryError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(StoreDocument {
                    version: STORE_VERSION,
                    groups: BTreeMap::new(),
                });
            }
            Err(e) => return Err(io_error(&self.path, e)),
        };

        let document: StoreDocument = serde_json::from_slice(&bytes)
            .map_err(|e| RepositoryError::Corrupt(format!("{}: {}", self.path.display(), e)))?;

        if document.version != STORE_VERSION {
            return Err(RepositoryError::Corrupt(format!(
                "{}: unsupported store version {}",
                self.path.display(),
                document.version
            )));
        }
        Ok(document)
    }

    async fn save(&self, document: &StoreDocument) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(parent, e))?;
        }

        let json = serde_json::to_vec_pretty(document)
            .map_err(|e| RepositoryError::Other(e.to_string()))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| io_error(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| io_error(&self.path, e))?;

        debug!(path = %self.path.display(), groups = document.groups.len(), "Preference store written");
        Ok(())
    }

    /// Apply `change` to the stored document and persist it
    async fn update<T>(
        &self,
        change: impl FnOnce(&mut StoreDocument) -> T,
    ) -> Result<T, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await?;
        let result = change(&mut document);
        self.save(&document).await?;
        Ok(result)
    }
}

fn io_error(path: &Path, error: std::io::Error) -> RepositoryError {
    RepositoryError::Io(format!("{}: {}", path.display(), error))
}

#[async_trait]
impl PreferenceRepository for JsonPreferenceRepository {
    async fn insert(
        &self,
        group: &GroupId,
        preference: Preference,
    ) -> Result<usize, RepositoryError> {
        self.insert_many(group, vec![preference]).await
    }

    async fn insert_many(
        &self,
        group: &GroupId,
        preferences: Vec<Preference>,
    ) -> Result<usize, RepositoryError> {
        self.update(|document| {
            let records = document.groups.entry(group.clone()).or_default();
            records.extend(preferences);
            records.len()
        })
        .await
    }

    async fn fetch_group(&self, group: &GroupId) -> Result<Vec<Preference>, RepositoryError> {
        let mut document = self.load().await?;
        Ok(document.groups.remove(group).unwrap_or_default())
    }

    async fn clear_group(&self, group: &GroupId) -> Result<usize, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await?;
        let Some(removed) = document.groups.remove(group) else {
            return Ok(0);
        };
        self.save(&document).await?;
        Ok(removed.len())
    }
}
