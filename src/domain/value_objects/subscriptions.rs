use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::{plans::PlanEntity, subscriptions::SubscriptionEntity},
    value_objects::{enums::subscription_statuses::SubscriptionStatus, plans::PlanDto},
};

#[derive(Debug, Clone, Deserialize)]
pub struct InsertSubscriptionModel {
    pub plan_id: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CurrentSubscriptionDto {
    pub plan_id: String,
    pub status: SubscriptionStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub auto_renew: bool,
    /// Absent when the subscription points at a plan no longer in the catalog.
    pub plan: Option<PlanDto>,
}

impl CurrentSubscriptionDto {
    pub fn new(subscription: SubscriptionEntity, plan: Option<PlanEntity>) -> Self {
        Self {
            plan_id: subscription.plan_id,
            status: subscription.status,
            start_date: subscription.start_date,
            end_date: subscription.end_date,
            auto_renew: subscription.auto_renew,
            plan: plan.map(PlanDto::from),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CancelSubscriptionResponse {
    pub cancelled: bool,
}

/// Outcome of one end-of-period pass over active subscriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RolloverReport {
    pub scanned: usize,
    pub renewed: usize,
    pub expired: usize,
    /// Changed by another request between the scan and the write; left untouched.
    pub skipped: usize,
    pub failed: usize,
}
