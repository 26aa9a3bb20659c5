use serde::Serialize;

use crate::domain::value_objects::{
    enums::{
        features::{Feature, MeteredFeature},
        usage_states::UsageState,
    },
    plans::{ADVANCED_SEARCH_PLAN_IDS, FREE_PLAN_ID, UNLIMITED},
};

/// Share of the cap at which a counter counts as near its limit.
pub const NEAR_LIMIT_PERCENT: i64 = 80;

/// Whether a plan id unlocks a flat feature for a company account.
pub fn plan_unlocks(feature: Feature, plan_id: &str) -> bool {
    match feature {
        Feature::ViewFullCurriculum | Feature::ContactCandidate | Feature::SaveFavorites => {
            plan_id != FREE_PLAN_ID
        }
        Feature::AdvancedSearch => ADVANCED_SEARCH_PLAN_IDS.contains(&plan_id),
    }
}

/// Outcome of a metered gate. Derived on every evaluation, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UsageDecision {
    pub used: i64,
    pub limit: i64,
    pub unlimited: bool,
    pub allowed: bool,
}

impl UsageDecision {
    pub fn evaluate(used: i64, limit: i64) -> Self {
        let unlimited = limit == UNLIMITED;
        Self {
            used,
            limit,
            unlimited,
            allowed: unlimited || used < limit,
        }
    }

    /// Decision handed to accounts that are not evaluated against plans.
    pub fn denied() -> Self {
        Self {
            used: 0,
            limit: 0,
            unlimited: false,
            allowed: false,
        }
    }

    /// Rounded share of the cap in use, capped at 100. Unlimited counters report 0
    /// and a zero cap reports 100.
    pub fn percentage(&self) -> i64 {
        if self.unlimited {
            return 0;
        }
        if self.limit <= 0 {
            return 100;
        }
        let used = self.used.max(0);
        ((200 * used + self.limit) / (2 * self.limit)).min(100)
    }

    pub fn state(&self) -> UsageState {
        if self.unlimited {
            return UsageState::BelowThreshold;
        }
        if self.used >= self.limit {
            return UsageState::LimitReached;
        }
        if self.used * 100 >= self.limit * NEAR_LIMIT_PERCENT {
            return UsageState::NearLimit;
        }
        UsageState::BelowThreshold
    }

    pub fn has_reached_limit(&self) -> bool {
        self.state() == UsageState::LimitReached
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UsageDecisionDto {
    pub feature: MeteredFeature,
    pub used: i64,
    pub limit: i64,
    pub unlimited: bool,
    pub allowed: bool,
    pub percentage: i64,
    pub state: UsageState,
}

impl UsageDecisionDto {
    pub fn new(feature: MeteredFeature, decision: UsageDecision) -> Self {
        Self {
            feature,
            used: decision.used,
            limit: decision.limit,
            unlimited: decision.unlimited,
            allowed: decision.allowed,
            percentage: decision.percentage(),
            state: decision.state(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UsageOverviewDto {
    pub plan_id: String,
    pub plan_name: String,
    pub curriculum_views: UsageDecisionDto,
    pub contacts: UsageDecisionDto,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FeatureDecisionDto {
    pub feature: Feature,
    pub allowed: bool,
    /// Lowest catalog plan unlocking the feature, set only when access is denied.
    pub required_plan_id: Option<String>,
}
