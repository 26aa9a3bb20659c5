use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::automock;

use crate::domain::entities::subscriptions::SubscriptionEntity;

#[automock]
#[async_trait]
pub trait SubscriptionRepository {
    /// The account's subscription when its status is active.
    async fn find_active(&self, account_id: &str) -> Result<Option<SubscriptionEntity>>;

    /// The account's subscription in any status.
    async fn find_by_account(&self, account_id: &str) -> Result<Option<SubscriptionEntity>>;

    /// Removes every record of the account and stores `subscription` in one atomic step.
    async fn replace(&self, subscription: SubscriptionEntity) -> Result<()>;

    /// Marks the account's record cancelled and stops auto-renewal.
    /// Returns `false` when the account has no record.
    async fn cancel(&self, account_id: &str) -> Result<bool>;

    async fn list_active(&self) -> Result<Vec<SubscriptionEntity>>;

    /// Moves an auto-renewing record to a new billing period, but only while the stored
    /// record still matches `expected` (active, same plan, same period, auto-renewing).
    /// Returns `false` when it was cancelled or replaced in the meantime.
    async fn renew(
        &self,
        expected: SubscriptionEntity,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<bool>;

    /// Marks a non-renewing record expired under the same matching rule as `renew`.
    async fn expire(&self, expected: SubscriptionEntity) -> Result<bool>;
}
