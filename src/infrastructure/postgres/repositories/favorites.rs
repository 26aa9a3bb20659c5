use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, dsl::exists, insert_into, prelude::*, select};

use crate::{
    domain::{entities::favorites::FavoriteEntity, repositories::favorites::FavoriteRepository},
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::favorites},
};

pub struct FavoritePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl FavoritePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl FavoriteRepository for FavoritePostgres {
    async fn list_by_account(&self, account_id: &str) -> Result<Vec<FavoriteEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = favorites::table
            .filter(favorites::account_id.eq(account_id))
            .order((favorites::added_on.desc(), favorites::curriculum_id.asc()))
            .select(FavoriteEntity::as_select())
            .load::<FavoriteEntity>(&mut conn)?;

        Ok(results)
    }

    async fn insert(&self, favorite: FavoriteEntity) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let inserted = insert_into(favorites::table)
            .values(&favorite)
            .on_conflict((favorites::account_id, favorites::curriculum_id))
            .do_nothing()
            .execute(&mut conn)?;

        Ok(inserted > 0)
    }

    async fn remove(&self, account_id: &str, curriculum_id: &str) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let removed = delete(
            favorites::table
                .filter(favorites::account_id.eq(account_id))
                .filter(favorites::curriculum_id.eq(curriculum_id)),
        )
        .execute(&mut conn)?;

        Ok(removed > 0)
    }

    async fn exists(&self, account_id: &str, curriculum_id: &str) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let found = select(exists(
            favorites::table
                .filter(favorites::account_id.eq(account_id))
                .filter(favorites::curriculum_id.eq(curriculum_id)),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(found)
    }
}
