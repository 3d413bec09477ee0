//! Clear Group use case
//!
//! Administrative removal of every stored preference of one group.

use crate::ports::preference_repository::{PreferenceRepository, RepositoryError};
use crate::use_cases::group_locks::GroupLocks;
use packvote_domain::GroupId;
use std::sync::Arc;
use tracing::info;

pub struct ClearGroupUseCase<R: PreferenceRepository + ?Sized> {
    repository: Arc<R>,
    locks: Arc<GroupLocks>,
}

impl<R: PreferenceRepository + ?Sized> ClearGroupUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            locks: Arc::new(GroupLocks::new()),
        }
    }

    pub fn with_locks(mut self, locks: Arc<GroupLocks>) -> Self {
        self.locks = locks;
        self
    }

    /// Returns how many records were removed
    pub async fn execute(&self, group: &GroupId) -> Result<usize, RepositoryError> {
        let _guard = self.locks.acquire(group).await;
        let removed = self.repository.clear_group(group).await?;
        info!(group = %group, removed, "Group cleared");
        Ok(removed)
    }
}
