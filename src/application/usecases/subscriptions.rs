use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::{
    entities::{plans::PlanEntity, subscriptions::SubscriptionEntity},
    repositories::{plans::PlanRepository, subscriptions::SubscriptionRepository},
    value_objects::{
        enums::{billing_periods::BillingPeriod, subscription_statuses::SubscriptionStatus},
        subscriptions::{CurrentSubscriptionDto, RolloverReport},
    },
};

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("plan not found: {0}")]
    PlanNotFound(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SubscriptionError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            SubscriptionError::PlanNotFound(_) => StatusCode::NOT_FOUND,
            SubscriptionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, SubscriptionError>;

pub struct SubscriptionUseCase {
    plan_repo: Arc<dyn PlanRepository + Send + Sync>,
    subscription_repo: Arc<dyn SubscriptionRepository + Send + Sync>,
}

impl SubscriptionUseCase {
    pub fn new(
        plan_repo: Arc<dyn PlanRepository + Send + Sync>,
        subscription_repo: Arc<dyn SubscriptionRepository + Send + Sync>,
    ) -> Self {
        Self {
            plan_repo,
            subscription_repo,
        }
    }

    pub async fn list_plans(&self) -> UseCaseResult<Vec<PlanEntity>> {
        Ok(self.plan_repo.list_plans().await?)
    }

    pub async fn get_active_subscription(
        &self,
        account_id: &str,
    ) -> UseCaseResult<Option<SubscriptionEntity>> {
        self.subscription_repo
            .find_active(account_id)
            .await
            .map_err(|err| {
                error!(
                    %account_id,
                    db_error = ?err,
                    "subscriptions: failed to load active subscription"
                );
                SubscriptionError::Internal(err)
            })
    }

    /// Active subscription joined with its catalog plan.
    pub async fn get_current_subscription(
        &self,
        account_id: &str,
    ) -> UseCaseResult<Option<CurrentSubscriptionDto>> {
        let Some(subscription) = self.get_active_subscription(account_id).await? else {
            return Ok(None);
        };

        let plan = self.plan_repo.find_by_id(&subscription.plan_id).await?;
        if plan.is_none() {
            warn!(
                %account_id,
                plan_id = %subscription.plan_id,
                "subscriptions: active subscription points at unknown plan"
            );
        }

        Ok(Some(CurrentSubscriptionDto::new(subscription, plan)))
    }

    pub async fn create_subscription(
        &self,
        account_id: &str,
        plan_id: &str,
    ) -> UseCaseResult<SubscriptionEntity> {
        self.create_subscription_on(account_id, plan_id, Utc::now().date_naive())
            .await
    }

    /// Replaces any existing subscription of the account with a fresh active one
    /// covering one billing period from `today`.
    pub async fn create_subscription_on(
        &self,
        account_id: &str,
        plan_id: &str,
        today: NaiveDate,
    ) -> UseCaseResult<SubscriptionEntity> {
        let Some(plan) = self.plan_repo.find_by_id(plan_id).await? else {
            let err = SubscriptionError::PlanNotFound(plan_id.to_string());
            warn!(
                %account_id,
                %plan_id,
                status = err.status_code().as_u16(),
                "subscriptions: subscribe to unknown plan rejected"
            );
            return Err(err);
        };

        let end_date = plan.billing_period.advance(today).ok_or_else(|| {
            anyhow::anyhow!("billing period overflow from {today} for plan {plan_id}")
        })?;

        let subscription = SubscriptionEntity {
            account_id: account_id.to_string(),
            plan_id: plan.id.clone(),
            status: SubscriptionStatus::Active,
            start_date: today,
            anchor_date: today,
            end_date,
            auto_renew: true,
        };

        self.subscription_repo
            .replace(subscription.clone())
            .await
            .map_err(|err| {
                error!(
                    %account_id,
                    %plan_id,
                    db_error = ?err,
                    "subscriptions: failed to store subscription"
                );
                SubscriptionError::Internal(err)
            })?;

        info!(
            %account_id,
            plan_id = %subscription.plan_id,
            start_date = %subscription.start_date,
            end_date = %subscription.end_date,
            "subscriptions: subscription created"
        );
        Ok(subscription)
    }

    /// Returns `false` when the account had nothing to cancel.
    pub async fn cancel_subscription(&self, account_id: &str) -> UseCaseResult<bool> {
        let cancelled = self
            .subscription_repo
            .cancel(account_id)
            .await
            .map_err(|err| {
                error!(
                    %account_id,
                    db_error = ?err,
                    "subscriptions: failed to cancel subscription"
                );
                SubscriptionError::Internal(err)
            })?;

        if cancelled {
            info!(%account_id, "subscriptions: subscription cancelled");
        } else {
            warn!(%account_id, "subscriptions: cancel requested without a subscription");
        }
        Ok(cancelled)
    }

    /// End-of-period pass: renews lapsed auto-renewing subscriptions for as many
    /// periods as needed to cover `today` and expires the rest.
    pub async fn rollover(&self, today: NaiveDate) -> UseCaseResult<RolloverReport> {
        let active = self.subscription_repo.list_active().await.map_err(|err| {
            error!(db_error = ?err, "subscriptions: failed to list active subscriptions");
            SubscriptionError::Internal(err)
        })?;

        let mut report = RolloverReport {
            scanned: active.len(),
            ..Default::default()
        };

        for subscription in active {
            if subscription.end_date > today {
                continue;
            }

            let account_id = subscription.account_id.clone();
            match self.roll_one(subscription, today).await {
                Ok(Rolled::Renewed) => report.renewed += 1,
                Ok(Rolled::Expired) => report.expired += 1,
                Ok(Rolled::Skipped) => {
                    report.skipped += 1;
                    info!(
                        %account_id,
                        "subscriptions: subscription changed during rollover, left as is"
                    );
                }
                Err(err) => {
                    report.failed += 1;
                    error!(
                        %account_id,
                        error = ?err,
                        "subscriptions: rollover failed for subscription"
                    );
                }
            }
        }

        info!(
            scanned = report.scanned,
            renewed = report.renewed,
            expired = report.expired,
            skipped = report.skipped,
            failed = report.failed,
            "subscriptions: rollover finished"
        );
        Ok(report)
    }

    /// Periods are counted from the anchor date, so a subscription taken out on the
    /// 31st keeps renewing on the last day of each month.
    async fn roll_one(
        &self,
        subscription: SubscriptionEntity,
        today: NaiveDate,
    ) -> anyhow::Result<Rolled> {
        if !subscription.auto_renew {
            if !self.subscription_repo.expire(subscription.clone()).await? {
                return Ok(Rolled::Skipped);
            }
            info!(
                account_id = %subscription.account_id,
                plan_id = %subscription.plan_id,
                "subscriptions: subscription expired"
            );
            return Ok(Rolled::Expired);
        }

        let period = self
            .plan_repo
            .find_by_id(&subscription.plan_id)
            .await?
            .map(|plan| plan.billing_period)
            .unwrap_or(BillingPeriod::Month);

        let anchor = subscription.anchor_date;
        let overflow = || anyhow::anyhow!("billing period overflow from anchor {anchor}");
        let mut periods = 1u32;
        let mut end_date = period.advance_by(anchor, periods).ok_or_else(overflow)?;
        while end_date <= today {
            periods += 1;
            end_date = period.advance_by(anchor, periods).ok_or_else(overflow)?;
        }
        let start_date = period
            .advance_by(anchor, periods - 1)
            .ok_or_else(overflow)?;

        let renewed = self
            .subscription_repo
            .renew(subscription.clone(), start_date, end_date)
            .await?;
        if !renewed {
            return Ok(Rolled::Skipped);
        }

        info!(
            account_id = %subscription.account_id,
            plan_id = %subscription.plan_id,
            %start_date,
            %end_date,
            "subscriptions: subscription renewed"
        );
        Ok(Rolled::Renewed)
    }
}

enum Rolled {
    Renewed,
    Expired,
    Skipped,
}
