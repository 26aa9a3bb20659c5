use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::{Connection, PgConnection, RunQueryDsl, insert_into, prelude::*};
use uuid::Uuid;

use crate::{
    domain::{
        repositories::usage_counters::UsageCounterRepository,
        value_objects::{
            enums::features::MeteredFeature,
            plans::UNLIMITED,
            usage::{UsageAttempt, UsageSnapshot, current_period_start, next_period_start},
        },
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{accounts, usage_events},
    },
};

pub struct UsageCounterPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl UsageCounterPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

fn count_in_period(
    conn: &mut PgConnection,
    account_id: &str,
    feature: MeteredFeature,
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> QueryResult<i64> {
    usage_events::table
        .filter(usage_events::account_id.eq(account_id))
        .filter(usage_events::feature.eq(feature.as_str()))
        .filter(usage_events::occurred_on.ge(period_start))
        .filter(usage_events::occurred_on.lt(period_end))
        .count()
        .get_result::<i64>(conn)
}

fn insert_event(
    conn: &mut PgConnection,
    account_id: &str,
    feature: MeteredFeature,
    occurred_on: NaiveDate,
) -> QueryResult<usize> {
    insert_into(usage_events::table)
        .values((
            usage_events::id.eq(Uuid::new_v4()),
            usage_events::account_id.eq(account_id),
            usage_events::feature.eq(feature.as_str()),
            usage_events::occurred_on.eq(occurred_on),
        ))
        .execute(conn)
}

#[async_trait]
impl UsageCounterRepository for UsageCounterPostgres {
    async fn get_usage(&self, account_id: &str, period_start: NaiveDate) -> Result<UsageSnapshot> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let period_end = next_period_start(period_start)
            .ok_or_else(|| anyhow!("usage period overflow from {period_start}"))?;
        let mut snapshot = UsageSnapshot::default();

        for feature in MeteredFeature::ALL {
            let count = count_in_period(&mut conn, account_id, feature, period_start, period_end)?;

            match feature {
                MeteredFeature::CurriculumViews => snapshot.curriculum_views = count,
                MeteredFeature::Contacts => snapshot.contacts = count,
            }
        }

        Ok(snapshot)
    }

    async fn record(
        &self,
        account_id: &str,
        feature: MeteredFeature,
        occurred_on: NaiveDate,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        insert_event(&mut conn, account_id, feature, occurred_on)?;

        Ok(())
    }

    async fn try_record(
        &self,
        account_id: &str,
        feature: MeteredFeature,
        occurred_on: NaiveDate,
        limit: i64,
    ) -> Result<UsageAttempt> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let period_start = current_period_start(occurred_on);
        let period_end = next_period_start(occurred_on)
            .ok_or_else(|| anyhow!("usage period overflow from {occurred_on}"))?;

        let attempt = conn.transaction::<UsageAttempt, diesel::result::Error, _>(|tx| {
            // Serializes recorders of the same account until commit.
            accounts::table
                .filter(accounts::id.eq(account_id))
                .select(accounts::id)
                .for_update()
                .first::<String>(tx)?;

            let used = count_in_period(tx, account_id, feature, period_start, period_end)?;
            if limit != UNLIMITED && used >= limit {
                return Ok(UsageAttempt {
                    recorded: false,
                    used,
                });
            }

            insert_event(tx, account_id, feature, occurred_on)?;
            Ok(UsageAttempt {
                recorded: true,
                used: used + 1,
            })
        })?;

        Ok(attempt)
    }
}
