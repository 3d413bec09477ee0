//! Preference repository port
//!
//! Storage for member preferences, keyed by group. Records come back in
//! submission order.

use async_trait::async_trait;
use packvote_domain::{GroupId, Preference};
use thiserror::Error;

/// Errors that can occur while reading or writing preferences
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Stored data is corrupt: {0}")]
    Corrupt(String),

    #[error("Repository error: {0}")]
    Other(String),
}

#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Append one record; returns the group's member count afterwards
    async fn insert(&self, group: &GroupId, preference: Preference)
    -> Result<usize, RepositoryError>;

    /// Append records in order, all or nothing; returns the member count afterwards
    async fn insert_many(
        &self,
        group: &GroupId,
        preferences: Vec<Preference>,
    ) -> Result<usize, RepositoryError>;

    /// All records of a group in submission order; unknown groups are empty
    async fn fetch_group(&self, group: &GroupId) -> Result<Vec<Preference>, RepositoryError>;

    /// Remove every record of a group; returns how many were removed
    async fn clear_group(&self, group: &GroupId) -> Result<usize, RepositoryError>;
}
