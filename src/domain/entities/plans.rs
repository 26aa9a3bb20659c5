use crate::domain::value_objects::enums::{
    billing_periods::BillingPeriod, features::MeteredFeature,
};

/// Immutable catalog entry. Caps use `UNLIMITED` (-1) for "no limit".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntity {
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

impl PlanEntity {
    pub fn limit_for(&self, metered: MeteredFeature) -> i64 {
        match metered {
            MeteredFeature::CurriculumViews => self.max_curriculum_views,
            MeteredFeature::Contacts => self.max_contacts,
        }
    }
}
