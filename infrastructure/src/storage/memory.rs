//! In-memory preference store

use async_trait::async_trait;
use packvote_application::ports::preference_repository::{PreferenceRepository, RepositoryError};
use packvote_domain::{GroupId, Preference};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-local store; records vanish when the process exits
#[derive(Debug, Default)]
pub struct InMemoryPreferenceRepository {
    groups: RwLock<HashMap<GroupId, Vec<Preference>>>,
}

impl InMemoryPreferenceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceRepository for InMemoryPreferenceRepository {
    async fn insert(
        &self,
        group: &GroupId,
        preference: Preference,
    ) -> Result<usize, RepositoryError> {
        let mut groups = self.groups.write().await;
        let records = groups.entry(group.clone()).or_default();
        records.push(preference);
        Ok(records.len())
    }

    async fn insert_many(
        &self,
        group: &GroupId,
        preferences: Vec<Preference>,
    ) -> Result<usize, RepositoryError> {
        let mut groups = self.groups.write().await;
        let records = groups.entry(group.clone()).or_default();
        records.extend(preferences);
        Ok(records.len())
    }

    async fn fetch_group(&self, group: &GroupId) -> Result<Vec<Preference>, RepositoryError> {
        Ok(self
            .groups
            .read()
            .await
            .get(group)
            .cloned()
            .unwrap_or_default())
    }

    async fn clear_group(&self, group: &GroupId) -> Result<usize, RepositoryError> {
        Ok(self
            .groups
            .write()
            .await
            .remove(group)
            .map_or(0, |records| records.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packvote_domain::TravelStyle;

    fn pref(destination: &str) -> Preference {
        Preference::new(1000.0, destination, 3, TravelStyle::Cultural, "").unwrap()
    }

    #[tokio::test]
    async fn test_groups_are_isolated_and_ordered() {
        let repo = InMemoryPreferenceRepository::new();
        let g1 = GroupId::new("G1");
        let g2 = GroupId::new("G2");

        repo.insert(&g1, pref("Goa")).await.unwrap();
        repo.insert(&g2, pref("Ooty")).await.unwrap();
        let count = repo
            .insert_many(&g1, vec![pref("Pune"), pref("Agra")])
            .await
            .unwrap();
        assert_eq!(count, 3);

        let destinations: Vec<_> = repo
            .fetch_group(&g1)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.destination)
            .collect();
        assert_eq!(destinations, vec!["Goa", "Pune", "Agra"]);
        assert_eq!(repo.fetch_group(&g2).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_group_is_empty_and_clear_counts() {
        let repo = InMemoryPreferenceRepository::new();
        let group = GroupId::new("nobody");
        assert!(repo.fetch_group(&group).await.unwrap().is_empty());
        assert_eq!(repo.clear_group(&group).await.unwrap(), 0);

        repo.insert(&group, pref("Goa")).await.unwrap();
        assert_eq!(repo.clear_group(&group).await.unwrap(), 1);
        assert!(repo.fetch_group(&group).await.unwrap().is_empty());
    }
}
