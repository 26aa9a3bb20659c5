use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::favorites::FavoriteEntity;

#[automock]
#[async_trait]
pub trait FavoriteRepository {
    /// Newest first; favorites saved on the same day are ordered by curriculum id.
    async fn list_by_account(&self, account_id: &str) -> Result<Vec<FavoriteEntity>>;

    /// Returns `false` when the curriculum is already saved by the account.
    async fn insert(&self, favorite: FavoriteEntity) -> Result<bool>;

    /// Returns `false` when there was nothing to remove.
    async fn remove(&self, account_id: &str, curriculum_id: &str) -> Result<bool>;

    async fn exists(&self, account_id: &str, curriculum_id: &str) -> Result<bool>;
}
