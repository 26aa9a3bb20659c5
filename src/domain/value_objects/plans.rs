use serde::Serialize;

use crate::domain::{
    entities::plans::PlanEntity, value_objects::enums::billing_periods::BillingPeriod,
};

/// Catalog id of the tier every account without an active subscription falls back to.
pub const FREE_PLAN_ID: &str = "free";
pub const PROFESSIONAL_PLAN_ID: &str = "professional";
/// Top tier. Older gate checks referred to it as "enterprise".
pub const VIP_PLAN_ID: &str = "VIP";

/// Cap sentinel meaning "no limit".
pub const UNLIMITED: i64 = -1;

/// Plans granting `advanced_search`.
pub const ADVANCED_SEARCH_PLAN_IDS: [&str; 2] = [PROFESSIONAL_PLAN_ID, VIP_PLAN_ID];

pub fn is_valid_cap(cap: i64) -> bool {
    cap == UNLIMITED || cap >= 0
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlanDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price_minor: i64,
    pub billing_period: BillingPeriod,
    pub features: Vec<String>,
    pub popular: bool,
    pub max_curriculum_views: i64,
    pub max_contacts: i64,
}

impl From<PlanEntity> for PlanDto {
    fn from(value: PlanEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            price_minor: value.price_minor,
            billing_period: value.billing_period,
            features: value.features,
            popular: value.popular,
            max_curriculum_views: value.max_curriculum_views,
            max_contacts: value.max_contacts,
        }
    }
}
