use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::automock;

use crate::domain::value_objects::{
    enums::features::MeteredFeature,
    usage::{UsageAttempt, UsageSnapshot},
};

#[automock]
#[async_trait]
pub trait UsageCounterRepository {
    /// Counts the account's usage in the calendar month starting at `period_start`.
    async fn get_usage(&self, account_id: &str, period_start: NaiveDate) -> Result<UsageSnapshot>;

    /// Unconditional insert, used for seeding.
    async fn record(
        &self,
        account_id: &str,
        feature: MeteredFeature,
        occurred_on: NaiveDate,
    ) -> Result<()>;

    /// Records one event unless the account already used `limit` in the period
    /// `occurred_on` falls in. Counting and inserting are one atomic step, so
    /// concurrent callers can never push the count past the cap.
    /// `UNLIMITED` disables the cap.
    async fn try_record(
        &self,
        account_id: &str,
        feature: MeteredFeature,
        occurred_on: NaiveDate,
        limit: i64,
    ) -> Result<UsageAttempt>;
}
