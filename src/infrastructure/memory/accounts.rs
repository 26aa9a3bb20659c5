use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    entities::accounts::AccountEntity, repositories::accounts::AccountRepository,
};

#[derive(Debug, Default)]
pub struct InMemoryAccounts {
    accounts: RwLock<HashMap<String, AccountEntity>>,
}

impl InMemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, account: AccountEntity) {
        self.accounts
            .write()
            .await
            .insert(account.id.clone(), account);
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccounts {
    async fn find_by_id(&self, account_id: &str) -> Result<Option<AccountEntity>> {
        Ok(self.accounts.read().await.get(account_id).cloned())
    }
}
