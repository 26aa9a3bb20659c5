use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::prelude::*;

use crate::{
    domain::{
        entities::accounts::{AccountEntity, AccountRow},
        repositories::accounts::AccountRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::accounts},
};

pub struct AccountPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl AccountPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl AccountRepository for AccountPostgres {
    async fn find_by_id(&self, account_id: &str) -> Result<Option<AccountEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = accounts::table
            .filter(accounts::id.eq(account_id))
            .select(AccountRow::as_select())
            .first::<AccountRow>(&mut conn)
            .optional()?;

        row.map(AccountEntity::try_from).transpose()
    }
}
