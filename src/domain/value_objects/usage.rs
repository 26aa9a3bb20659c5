use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::domain::value_objects::enums::features::MeteredFeature;

/// Consumption of the metered features for one account in the current period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UsageSnapshot {
    pub curriculum_views: i64,
    pub contacts: i64,
}

impl UsageSnapshot {
    pub fn get(&self, metered: MeteredFeature) -> i64 {
        match metered {
            MeteredFeature::CurriculumViews => self.curriculum_views,
            MeteredFeature::Contacts => self.contacts,
        }
    }
}

/// Result of a capped recording attempt. `used` is the count after the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageAttempt {
    pub recorded: bool,
    pub used: i64,
}

/// Usage periods are calendar months; counters roll over on the first day.
pub fn current_period_start(today: NaiveDate) -> NaiveDate {
    today.with_day(1).unwrap_or(today)
}

/// First day of the period after the one `today` falls in.
pub fn next_period_start(today: NaiveDate) -> Option<NaiveDate> {
    current_period_start(today).checked_add_months(Months::new(1))
}
