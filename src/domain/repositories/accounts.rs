use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::accounts::AccountEntity;

#[automock]
#[async_trait]
pub trait AccountRepository {
    async fn find_by_id(&self, account_id: &str) -> Result<Option<AccountEntity>>;
}
