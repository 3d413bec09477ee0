//! Submit Preference use case
//!
//! Validates member preferences and stores them for a group, either one at a
//! time or as a bulk import of a JSON array.

use crate::ports::preference_repository::{PreferenceRepository, RepositoryError};
use crate::use_cases::group_locks::GroupLocks;
use packvote_domain::{GroupId, Preference, PreferenceError};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while submitting preferences
#[derive(Error, Debug)]
pub enum SubmitPreferenceError {
    #[error("Invalid preference: {0}")]
    Invalid(#[from] PreferenceError),

    #[error("Invalid preference at position {index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: PreferenceError,
    },

    #[error("Import is not a JSON array of preferences: {0}")]
    ImportFormat(String),

    #[error("Import contains no preferences")]
    EmptyImport,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Use case for adding preferences to a group
pub struct SubmitPreferenceUseCase<R: PreferenceRepository + ?Sized> {
    repository: Arc<R>,
    locks: Arc<GroupLocks>,
}

impl<R: PreferenceRepository + ?Sized> SubmitPreferenceUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            locks: Arc::new(GroupLocks::new()),
        }
    }

    /// Share group locks with other use cases operating on the same store
    pub fn with_locks(mut self, locks: Arc<GroupLocks>) -> Self {
        self.locks = locks;
        self
    }

    /// Store one preference; returns the group's member count afterwards
    pub async fn execute(
        &self,
        group: &GroupId,
        preference: Preference,
    ) -> Result<usize, SubmitPreferenceError> {
        preference.validate()?;

        let _guard = self.locks.acquire(group).await;
        let members = self.repository.insert(group, preference).await?;
        info!(group = %group, members, "Preference submitted");
        Ok(members)
    }

    /// Import a JSON array of preferences.
    ///
    /// Nothing is stored unless every record is valid.
    pub async fn import_json(
        &self,
        group: &GroupId,
        json: &str,
    ) -> Result<usize, SubmitPreferenceError> {
        let preferences: Vec<Preference> = serde_json::from_str(json)
            .map_err(|e| SubmitPreferenceError::ImportFormat(e.to_string()))?;
        self.import(group, preferences).await
    }

    /// Import already-parsed preferences, all or nothing
    pub async fn import(
        &self,
        group: &GroupId,
        preferences: Vec<Preference>,
    ) -> Result<usize, SubmitPreferenceError> {
        if preferences.is_empty() {
            return Err(SubmitPreferenceError::EmptyImport);
        }
        for (index, preference) in preferences.iter().enumerate() {
            preference
                .validate()
                .map_err(|source| SubmitPreferenceError::InvalidRecord { index, source })?;
        }

        let imported = preferences.len();
        let _guard = self.locks.acquire(group).await;
        let members = self.repository.insert_many(group, preferences).await?;
        info!(group = %group, imported, members, "Preferences imported");
        Ok(members)
    }
}
