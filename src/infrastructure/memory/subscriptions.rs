use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::{
    entities::subscriptions::SubscriptionEntity,
    repositories::subscriptions::SubscriptionRepository,
    value_objects::enums::subscription_statuses::SubscriptionStatus,
};

/// One slot per account, so a replace can never leave two active records behind.
#[derive(Debug, Default)]
pub struct InMemorySubscriptions {
    slots: RwLock<HashMap<String, SubscriptionEntity>>,
}

impl InMemorySubscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptions {
    async fn find_active(&self, account_id: &str) -> Result<Option<SubscriptionEntity>> {
        Ok(self
            .slots
            .read()
            .await
            .get(account_id)
            .filter(|subscription| subscription.is_active())
            .cloned())
    }

    async fn find_by_account(&self, account_id: &str) -> Result<Option<SubscriptionEntity>> {
        Ok(self.slots.read().await.get(account_id).cloned())
    }

    async fn replace(&self, subscription: SubscriptionEntity) -> Result<()> {
        self.slots
            .write()
            .await
            .insert(subscription.account_id.clone(), subscription);
        Ok(())
    }

    async fn cancel(&self, account_id: &str) -> Result<bool> {
        let mut slots = self.slots.write().await;
        match slots.get_mut(account_id) {
            Some(subscription) => {
                subscription.status = SubscriptionStatus::Cancelled;
                subscription.auto_renew = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_active(&self) -> Result<Vec<SubscriptionEntity>> {
        let mut active: Vec<SubscriptionEntity> = self
            .slots
            .read()
            .await
            .values()
            .filter(|subscription| subscription.is_active())
            .cloned()
            .collect();
        active.sort_by(|a, b| a.account_id.cmp(&b.account_id));
        Ok(active)
    }

    async fn renew(
        &self,
        expected: SubscriptionEntity,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<bool> {
        let mut slots = self.slots.write().await;
        match slots.get_mut(&expected.account_id) {
            Some(stored) if still_matches(stored, &expected) && expected.auto_renew => {
                stored.start_date = start_date;
                stored.end_date = end_date;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn expire(&self, expected: SubscriptionEntity) -> Result<bool> {
        let mut slots = self.slots.write().await;
        match slots.get_mut(&expected.account_id) {
            Some(stored) if still_matches(stored, &expected) && !expected.auto_renew => {
                stored.status = SubscriptionStatus::Expired;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

fn still_matches(stored: &SubscriptionEntity, expected: &SubscriptionEntity) -> bool {
    stored.is_active()
        && stored.plan_id == expected.plan_id
        && stored.start_date == expected.start_date
        && stored.end_date == expected.end_date
        && stored.auto_renew == expected.auto_renew
}
