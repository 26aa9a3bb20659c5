use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::{Connection, RunQueryDsl, delete, insert_into, prelude::*, update};

use crate::{
    domain::{
        entities::subscriptions::{SubscriptionEntity, SubscriptionRow},
        repositories::subscriptions::SubscriptionRepository,
        value_objects::enums::subscription_statuses::SubscriptionStatus,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::subscriptions},
};

/// The table is keyed by `account_id`, so the database itself holds one record per account.
pub struct SubscriptionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl SubscriptionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionPostgres {
    async fn find_active(&self, account_id: &str) -> Result<Option<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = subscriptions::table
            .filter(subscriptions::account_id.eq(account_id))
            .filter(subscriptions::status.eq(SubscriptionStatus::Active.to_string()))
            .select(SubscriptionRow::as_select())
            .first::<SubscriptionRow>(&mut conn)
            .optional()?;

        Ok(row.map(SubscriptionEntity::from))
    }

    async fn find_by_account(&self, account_id: &str) -> Result<Option<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = subscriptions::table
            .filter(subscriptions::account_id.eq(account_id))
            .select(SubscriptionRow::as_select())
            .first::<SubscriptionRow>(&mut conn)
            .optional()?;

        Ok(row.map(SubscriptionEntity::from))
    }

    async fn replace(&self, subscription: SubscriptionEntity) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let row = SubscriptionRow::from(subscription);

        conn.transaction::<(), diesel::result::Error, _>(|tx| {
            delete(subscriptions::table.filter(subscriptions::account_id.eq(&row.account_id)))
                .execute(tx)?;

            insert_into(subscriptions::table).values(&row).execute(tx)?;

            Ok(())
        })?;

        Ok(())
    }

    async fn cancel(&self, account_id: &str) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = update(subscriptions::table)
            .filter(subscriptions::account_id.eq(account_id))
            .set((
                subscriptions::status.eq(SubscriptionStatus::Cancelled.to_string()),
                subscriptions::auto_renew.eq(false),
            ))
            .execute(&mut conn)?;

        Ok(affected > 0)
    }

    async fn list_active(&self) -> Result<Vec<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = subscriptions::table
            .filter(subscriptions::status.eq(SubscriptionStatus::Active.to_string()))
            .order(subscriptions::account_id.asc())
            .select(SubscriptionRow::as_select())
            .load::<SubscriptionRow>(&mut conn)?;

        Ok(rows.into_iter().map(SubscriptionEntity::from).collect())
    }

    async fn renew(
        &self,
        expected: SubscriptionEntity,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<bool> {
        if !expected.auto_renew {
            return Ok(false);
        }
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = update(subscriptions::table)
            .filter(subscriptions::account_id.eq(&expected.account_id))
            .filter(subscriptions::status.eq(SubscriptionStatus::Active.to_string()))
            .filter(subscriptions::plan_id.eq(&expected.plan_id))
            .filter(subscriptions::start_date.eq(expected.start_date))
            .filter(subscriptions::end_date.eq(expected.end_date))
            .filter(subscriptions::auto_renew.eq(true))
            .set((
                subscriptions::start_date.eq(start_date),
                subscriptions::end_date.eq(end_date),
            ))
            .execute(&mut conn)?;

        Ok(affected > 0)
    }

    async fn expire(&self, expected: SubscriptionEntity) -> Result<bool> {
        if expected.auto_renew {
            return Ok(false);
        }
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = update(subscriptions::table)
            .filter(subscriptions::account_id.eq(&expected.account_id))
            .filter(subscriptions::status.eq(SubscriptionStatus::Active.to_string()))
            .filter(subscriptions::plan_id.eq(&expected.plan_id))
            .filter(subscriptions::start_date.eq(expected.start_date))
            .filter(subscriptions::end_date.eq(expected.end_date))
            .filter(subscriptions::auto_renew.eq(false))
            .set(subscriptions::status.eq(SubscriptionStatus::Expired.to_string()))
            .execute(&mut conn)?;

        Ok(affected > 0)
    }
}
