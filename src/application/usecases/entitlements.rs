use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::domain::{
    entities::{accounts::AccountEntity, plans::PlanEntity},
    repositories::{
        accounts::AccountRepository, plans::PlanRepository,
        usage_counters::UsageCounterRepository,
    },
    value_objects::{
        entitlements::{
            FeatureDecisionDto, UsageDecision, UsageDecisionDto, UsageOverviewDto, plan_unlocks,
        },
        enums::features::{Feature, MeteredFeature},
        usage::current_period_start,
    },
};

use super::plan_resolver::PlanResolver;

#[derive(Debug, Error)]
pub enum EntitlementError {
    #[error("entitlements apply to company accounts only")]
    NotCompanyAccount,
    #[error("{feature} limit reached: {used} of {limit} used this period")]
    LimitReached {
        feature: MeteredFeature,
        used: i64,
        limit: i64,
    },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl EntitlementError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            EntitlementError::NotCompanyAccount => StatusCode::FORBIDDEN,
            EntitlementError::LimitReached { .. } => StatusCode::PAYMENT_REQUIRED,
            EntitlementError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type EntitlementResult<T> = std::result::Result<T, EntitlementError>;

/// Allow/deny decisions for flat features and metered counters.
///
/// Read-only decisions never fail the caller: unknown or non-company accounts are
/// denied, and storage failures degrade to a denial after being logged. Recording
/// usage does surface storage failures.
pub struct EntitlementUseCase {
    account_repo: Arc<dyn AccountRepository + Send + Sync>,
    plan_repo: Arc<dyn PlanRepository + Send + Sync>,
    usage_repo: Arc<dyn UsageCounterRepository + Send + Sync>,
    plan_resolver: Arc<PlanResolver>,
}

impl EntitlementUseCase {
    pub fn new(
        account_repo: Arc<dyn AccountRepository + Send + Sync>,
        plan_repo: Arc<dyn PlanRepository + Send + Sync>,
        usage_repo: Arc<dyn UsageCounterRepository + Send + Sync>,
        plan_resolver: Arc<PlanResolver>,
    ) -> Self {
        Self {
            account_repo,
            plan_repo,
            usage_repo,
            plan_resolver,
        }
    }

    /// Plan the account is evaluated against. Accounts without an active subscription
    /// resolve to the free plan.
    pub async fn resolve_plan(&self, account_id: &str) -> EntitlementResult<PlanEntity> {
        self.plan_resolver
            .resolve_effective_plan(account_id)
            .await
            .map_err(|err| {
                error!(
                    %account_id,
                    db_error = ?err,
                    "entitlements: failed to resolve plan"
                );
                EntitlementError::Internal(err)
            })
    }

    pub async fn evaluate_feature(&self, account_id: &str, feature: Feature) -> bool {
        if !matches!(self.company_account(account_id).await, Ok(Some(_))) {
            debug!(%account_id, %feature, "entitlements: non-company account denied");
            return false;
        }
        self.plan_allows(account_id, feature).await
    }

    /// Feature decision. A company account that is denied also learns the cheapest
    /// plan that would unlock the feature; other accounts get no upgrade hint.
    pub async fn feature_decision(&self, account_id: &str, feature: Feature) -> FeatureDecisionDto {
        if !matches!(self.company_account(account_id).await, Ok(Some(_))) {
            debug!(%account_id, %feature, "entitlements: non-company account denied");
            return FeatureDecisionDto {
                feature,
                allowed: false,
                required_plan_id: None,
            };
        }

        let allowed = self.plan_allows(account_id, feature).await;
        let required_plan_id = if allowed {
            None
        } else {
            self.required_plan(feature).await.map(|plan| plan.id)
        };

        FeatureDecisionDto {
            feature,
            allowed,
            required_plan_id,
        }
    }

    /// Whether the account exists and is a company account.
    pub async fn is_company_account(&self, account_id: &str) -> EntitlementResult<bool> {
        Ok(self.company_account(account_id).await?.is_some())
    }

    /// Lowest plan in catalog order whose tier unlocks `feature`.
    pub async fn required_plan(&self, feature: Feature) -> Option<PlanEntity> {
        match self.plan_repo.list_plans().await {
            Ok(plans) => plans
                .into_iter()
                .find(|plan| plan_unlocks(feature, &plan.id)),
            Err(err) => {
                error!(
                    %feature,
                    db_error = ?err,
                    "entitlements: failed to list plans for upgrade hint"
                );
                None
            }
        }
    }

    pub async fn evaluate_usage(&self, account_id: &str, metered: MeteredFeature) -> UsageDecision {
        self.evaluate_usage_on(account_id, metered, Utc::now().date_naive())
            .await
    }

    /// Usage decision for the calendar month containing `today`.
    pub async fn evaluate_usage_on(
        &self,
        account_id: &str,
        metered: MeteredFeature,
        today: NaiveDate,
    ) -> UsageDecision {
        match self.company_usage(account_id, metered, today).await {
            Ok(Some(decision)) => decision,
            _ => UsageDecision::denied(),
        }
    }

    pub async fn has_reached_limit(&self, account_id: &str, metered: MeteredFeature) -> bool {
        matches!(
            self.company_usage(account_id, metered, Utc::now().date_naive()).await,
            Ok(Some(decision)) if decision.has_reached_limit()
        )
    }

    /// Both metered counters against the resolved plan; `None` for accounts without
    /// an entitlement concept.
    pub async fn usage_overview(
        &self,
        account_id: &str,
    ) -> EntitlementResult<Option<UsageOverviewDto>> {
        self.usage_overview_on(account_id, Utc::now().date_naive())
            .await
    }

    pub async fn usage_overview_on(
        &self,
        account_id: &str,
        today: NaiveDate,
    ) -> EntitlementResult<Option<UsageOverviewDto>> {
        if self.company_account(account_id).await?.is_none() {
            return Ok(None);
        }

        let plan = self.resolve_plan(account_id).await?;
        let usage = self
            .usage_repo
            .get_usage(account_id, current_period_start(today))
            .await
            .map_err(|err| {
                error!(
                    %account_id,
                    db_error = ?err,
                    "entitlements: failed to load usage counters"
                );
                EntitlementError::Internal(err)
            })?;

        let decide = |metered: MeteredFeature| {
            UsageDecisionDto::new(
                metered,
                UsageDecision::evaluate(usage.get(metered), plan.limit_for(metered)),
            )
        };

        Ok(Some(UsageOverviewDto {
            curriculum_views: decide(MeteredFeature::CurriculumViews),
            contacts: decide(MeteredFeature::Contacts),
            plan_id: plan.id.clone(),
            plan_name: plan.name.clone(),
        }))
    }

    pub async fn record_usage(
        &self,
        account_id: &str,
        metered: MeteredFeature,
    ) -> EntitlementResult<UsageDecision> {
        self.record_usage_on(account_id, metered, Utc::now().date_naive())
            .await
    }

    /// Records one usage event when the cap allows it and returns the decision after
    /// the increment. The cap check and the insert are a single repository step.
    pub async fn record_usage_on(
        &self,
        account_id: &str,
        metered: MeteredFeature,
        today: NaiveDate,
    ) -> EntitlementResult<UsageDecision> {
        if self.company_account(account_id).await?.is_none() {
            let err = EntitlementError::NotCompanyAccount;
            warn!(
                %account_id,
                feature = %metered,
                status = err.status_code().as_u16(),
                "entitlements: usage recorded for non-company account"
            );
            return Err(err);
        }

        let plan = self.resolve_plan(account_id).await?;
        let limit = plan.limit_for(metered);
        let attempt = self
            .usage_repo
            .try_record(account_id, metered, today, limit)
            .await
            .map_err(|err| {
                error!(
                    %account_id,
                    feature = %metered,
                    db_error = ?err,
                    "entitlements: failed to record usage event"
                );
                EntitlementError::Internal(err)
            })?;

        if !attempt.recorded {
            let err = EntitlementError::LimitReached {
                feature: metered,
                used: attempt.used,
                limit,
            };
            warn!(
                %account_id,
                feature = %metered,
                used = attempt.used,
                limit,
                status = err.status_code().as_u16(),
                "entitlements: usage denied, limit reached"
            );
            return Err(err);
        }

        let after = UsageDecision::evaluate(attempt.used, limit);
        info!(
            %account_id,
            feature = %metered,
            used = after.used,
            limit = after.limit,
            state = %after.state(),
            "entitlements: usage recorded"
        );
        Ok(after)
    }

    async fn plan_allows(&self, account_id: &str, feature: Feature) -> bool {
        match self.resolve_plan(account_id).await {
            Ok(plan) => {
                let allowed = plan_unlocks(feature, &plan.id);
                debug!(
                    %account_id,
                    %feature,
                    plan_id = %plan.id,
                    allowed,
                    "entitlements: feature evaluated"
                );
                allowed
            }
            Err(_) => false,
        }
    }

    /// `Ok(None)` for accounts without an entitlement concept.
    async fn company_usage(
        &self,
        account_id: &str,
        metered: MeteredFeature,
        today: NaiveDate,
    ) -> EntitlementResult<Option<UsageDecision>> {
        if self.company_account(account_id).await?.is_none() {
            return Ok(None);
        }

        let plan = self.resolve_plan(account_id).await?;
        let usage = self
            .usage_repo
            .get_usage(account_id, current_period_start(today))
            .await
            .map_err(|err| {
                error!(
                    %account_id,
                    feature = %metered,
                    db_error = ?err,
                    "entitlements: failed to load usage counters"
                );
                EntitlementError::Internal(err)
            })?;

        let decision = UsageDecision::evaluate(usage.get(metered), plan.limit_for(metered));
        debug!(
            %account_id,
            feature = %metered,
            plan_id = %plan.id,
            used = decision.used,
            limit = decision.limit,
            allowed = decision.allowed,
            "entitlements: usage evaluated"
        );
        Ok(Some(decision))
    }

    async fn company_account(&self, account_id: &str) -> EntitlementResult<Option<AccountEntity>> {
        match self.account_repo.find_by_id(account_id).await {
            Ok(account) => Ok(account.filter(AccountEntity::is_company)),
            Err(err) => {
                error!(
                    %account_id,
                    db_error = ?err,
                    "entitlements: failed to load account"
                );
                Err(EntitlementError::Internal(err))
            }
        }
    }
}
