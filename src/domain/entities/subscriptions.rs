use chrono::NaiveDate;
use diesel::prelude::*;
use serde::Serialize;

use crate::{
    domain::value_objects::enums::subscription_statuses::SubscriptionStatus,
    infrastructure::postgres::schema::subscriptions,
};

/// Binding of one account to one plan. The store keeps a single record per account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionEntity {
    pub account_id: String,
    pub plan_id: String,
    pub status: SubscriptionStatus,
    /// Start of the current billing period.
    pub start_date: NaiveDate,
    /// Day the subscription was taken out. Renewed periods are counted from it so
    /// month-end anniversaries do not drift after a short month.
    pub anchor_date: NaiveDate,
    pub end_date: NaiveDate,
    pub auto_renew: bool,
}

impl SubscriptionEntity {
    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }
}

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, Insertable)]
#[diesel(table_name = subscriptions)]
#[diesel(primary_key(account_id))]
pub struct SubscriptionRow {
    pub account_id: String,
    pub plan_id: String,
    pub status: String,
    pub start_date: NaiveDate,
    pub anchor_date: NaiveDate,
    pub end_date: NaiveDate,
    pub auto_renew: bool,
}

impl From<SubscriptionRow> for SubscriptionEntity {
    fn from(value: SubscriptionRow) -> Self {
        Self {
            account_id: value.account_id,
            plan_id: value.plan_id,
            status: SubscriptionStatus::from_str(&value.status),
            start_date: value.start_date,
            anchor_date: value.anchor_date,
            end_date: value.end_date,
            auto_renew: value.auto_renew,
        }
    }
}

impl From<SubscriptionEntity> for SubscriptionRow {
    fn from(value: SubscriptionEntity) -> Self {
        Self {
            account_id: value.account_id,
            plan_id: value.plan_id,
            status: value.status.to_string(),
            start_date: value.start_date,
            anchor_date: value.anchor_date,
            end_date: value.end_date,
            auto_renew: value.auto_renew,
        }
    }
}
