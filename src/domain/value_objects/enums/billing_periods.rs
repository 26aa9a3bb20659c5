use std::fmt::Display;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BillingPeriod {
    #[default]
    Month,
    Year,
}

impl BillingPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingPeriod::Month => "month",
            BillingPeriod::Year => "year",
        }
    }

    /// Date exactly one period after `from`, clamped to the end of shorter months.
    pub fn advance(&self, from: NaiveDate) -> Option<NaiveDate> {
        self.advance_by(from, 1)
    }

    /// Date `periods` periods after `anchor`. Counting from a fixed anchor keeps the
    /// day of month: Jan 31 + 2 months is Mar 31, not Mar 29.
    pub fn advance_by(&self, anchor: NaiveDate, periods: u32) -> Option<NaiveDate> {
        let months = match self {
            BillingPeriod::Month => 1u32,
            BillingPeriod::Year => 12,
        };
        anchor.checked_add_months(Months::new(months.checked_mul(periods)?))
    }
}

impl Display for BillingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monthly_period_ends_one_month_later() {
        assert_eq!(
            BillingPeriod::Month.advance(date(2024, 1, 1)),
            Some(date(2024, 2, 1))
        );
    }

    #[test]
    fn monthly_period_clamps_to_short_month() {
        assert_eq!(
            BillingPeriod::Month.advance(date(2024, 1, 31)),
            Some(date(2024, 2, 29))
        );
    }

    #[test]
    fn anchored_periods_keep_the_day_of_month() {
        assert_eq!(
            BillingPeriod::Month.advance_by(date(2024, 1, 31), 1),
            Some(date(2024, 2, 29))
        );
        assert_eq!(
            BillingPeriod::Month.advance_by(date(2024, 1, 31), 2),
            Some(date(2024, 3, 31))
        );
    }

    #[test]
    fn yearly_period_ends_twelve_months_later() {
        assert_eq!(
            BillingPeriod::Year.advance(date(2024, 3, 15)),
            Some(date(2025, 3, 15))
        );
    }
}
