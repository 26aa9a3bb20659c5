use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    entities::favorites::FavoriteEntity, repositories::favorites::FavoriteRepository,
};

#[derive(Debug, Default)]
pub struct InMemoryFavorites {
    entries: RwLock<Vec<FavoriteEntity>>,
}

impl InMemoryFavorites {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryFavorites {
    async fn list_by_account(&self, account_id: &str) -> Result<Vec<FavoriteEntity>> {
        let mut favorites: Vec<FavoriteEntity> = self
            .entries
            .read()
            .await
            .iter()
            .filter(|favorite| favorite.account_id == account_id)
            .cloned()
            .collect();
        favorites.sort_by(|a, b| {
            b.added_on
                .cmp(&a.added_on)
                .then_with(|| a.curriculum_id.cmp(&b.curriculum_id))
        });
        Ok(favorites)
    }

    async fn insert(&self, favorite: FavoriteEntity) -> Result<bool> {
        let mut entries = self.entries.write().await;
        let exists = entries.iter().any(|existing| {
            existing.account_id == favorite.account_id
                && existing.curriculum_id == favorite.curriculum_id
        });
        if exists {
            return Ok(false);
        }
        entries.push(favorite);
        Ok(true)
    }

    async fn remove(&self, account_id: &str, curriculum_id: &str) -> Result<bool> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|favorite| {
            !(favorite.account_id == account_id && favorite.curriculum_id == curriculum_id)
        });
        Ok(entries.len() < before)
    }

    async fn exists(&self, account_id: &str, curriculum_id: &str) -> Result<bool> {
        Ok(self.entries.read().await.iter().any(|favorite| {
            favorite.account_id == account_id && favorite.curriculum_id == curriculum_id
        }))
    }
}
