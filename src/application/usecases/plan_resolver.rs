use std::sync::Arc;

use anyhow::{Result, anyhow};
use tracing::{debug, warn};

use crate::domain::{
    entities::plans::PlanEntity,
    repositories::{plans::PlanRepository, subscriptions::SubscriptionRepository},
    value_objects::plans::FREE_PLAN_ID,
};

/// Resolves the effective plan for an account: active subscription plan or free plan fallback.
///
/// Both the flat feature gates and the metered gates go through this one lookup so the
/// fallback cannot drift between them.
pub struct PlanResolver {
    plan_repo: Arc<dyn PlanRepository + Send + Sync>,
    subscription_repo: Arc<dyn SubscriptionRepository + Send + Sync>,
}

impl PlanResolver {
    pub fn new(
        plan_repo: Arc<dyn PlanRepository + Send + Sync>,
        subscription_repo: Arc<dyn SubscriptionRepository + Send + Sync>,
    ) -> Self {
        Self {
            plan_repo,
            subscription_repo,
        }
    }

    pub async fn resolve_effective_plan(&self, account_id: &str) -> Result<PlanEntity> {
        if let Some(subscription) = self.subscription_repo.find_active(account_id).await? {
            if let Some(plan) = self.plan_repo.find_by_id(&subscription.plan_id).await? {
                debug!(
                    %account_id,
                    plan_id = %plan.id,
                    "plan_resolver: using active subscription plan"
                );
                return Ok(plan);
            }

            warn!(
                %account_id,
                plan_id = %subscription.plan_id,
                "plan_resolver: subscription points at unknown plan; falling back to free plan"
            );
        }

        debug!(%account_id, "plan_resolver: falling back to free plan");
        self.free_plan().await
    }

    pub async fn free_plan(&self) -> Result<PlanEntity> {
        self.plan_repo
            .find_by_id(FREE_PLAN_ID)
            .await?
            .ok_or_else(|| anyhow!("plan catalog has no {FREE_PLAN_ID} plan"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::subscriptions::SubscriptionEntity,
        repositories::{plans::MockPlanRepository, subscriptions::MockSubscriptionRepository},
        value_objects::{
            enums::{billing_periods::BillingPeriod, subscription_statuses::SubscriptionStatus},
            plans::PROFESSIONAL_PLAN_ID,
        },
    };
    use chrono::NaiveDate;

    fn sample_plan(id: &str) -> PlanEntity {
        PlanEntity {
            id: id.to_string(),
            name: "Plan".to_string(),
            description: String::new(),
            price_minor: 1000,
            billing_period: BillingPeriod::Month,
            features: Vec::new(),
            popular: false,
            max_curriculum_views: 5,
            max_contacts: 0,
        }
    }

    fn sample_subscription(account_id: &str, plan_id: &str) -> SubscriptionEntity {
        SubscriptionEntity {
            account_id: account_id.to_string(),
            plan_id: plan_id.to_string(),
            status: SubscriptionStatus::Active,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            anchor_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            auto_renew: true,
        }
    }

    #[tokio::test]
    async fn returns_paid_plan_when_subscription_exists() {
        let mut plan_repo = MockPlanRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();

        let subscription = sample_subscription("2", PROFESSIONAL_PLAN_ID);
        subscription_repo
            .expect_find_active()
            .withf(|account_id: &str| account_id == "2")
            .times(1)
            .returning(move |_| Ok(Some(subscription.clone())));

        let paid_plan = sample_plan(PROFESSIONAL_PLAN_ID);
        plan_repo
            .expect_find_by_id()
            .withf(|plan_id: &str| plan_id == PROFESSIONAL_PLAN_ID)
            .times(1)
            .returning(move |_| Ok(Some(paid_plan.clone())));

        let resolver = PlanResolver::new(Arc::new(plan_repo), Arc::new(subscription_repo));

        let plan = resolver.resolve_effective_plan("2").await.unwrap();

        assert_eq!(plan.id, PROFESSIONAL_PLAN_ID);
    }

    #[tokio::test]
    async fn falls_back_to_free_plan_when_no_active_subscription() {
        let mut plan_repo = MockPlanRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();

        subscription_repo
            .expect_find_active()
            .returning(|_| Ok(None));

        let free_plan = sample_plan(FREE_PLAN_ID);
        plan_repo
            .expect_find_by_id()
            .withf(|plan_id: &str| plan_id == FREE_PLAN_ID)
            .times(1)
            .returning(move |_| Ok(Some(free_plan.clone())));

        let resolver = PlanResolver::new(Arc::new(plan_repo), Arc::new(subscription_repo));

        let plan = resolver.resolve_effective_plan("5").await.unwrap();

        assert_eq!(plan.id, FREE_PLAN_ID);
    }

    #[tokio::test]
    async fn falls_back_to_free_plan_when_subscription_plan_is_unknown() {
        let mut plan_repo = MockPlanRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();

        let subscription = sample_subscription("2", "enterprise");
        subscription_repo
            .expect_find_active()
            .returning(move |_| Ok(Some(subscription.clone())));

        let free_plan = sample_plan(FREE_PLAN_ID);
        plan_repo
            .expect_find_by_id()
            .returning(move |plan_id| {
                if plan_id == FREE_PLAN_ID {
                    Ok(Some(free_plan.clone()))
                } else {
                    Ok(None)
                }
            });

        let resolver = PlanResolver::new(Arc::new(plan_repo), Arc::new(subscription_repo));

        let plan = resolver.resolve_effective_plan("2").await.unwrap();

        assert_eq!(plan.id, FREE_PLAN_ID);
    }

    #[tokio::test]
    async fn storage_errors_propagate() {
        let plan_repo = MockPlanRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();

        subscription_repo
            .expect_find_active()
            .returning(|_| Err(anyhow!("connection refused")));

        let resolver = PlanResolver::new(Arc::new(plan_repo), Arc::new(subscription_repo));

        assert!(resolver.resolve_effective_plan("2").await.is_err());
    }
}
