use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::{
    repositories::usage_counters::UsageCounterRepository,
    value_objects::{
        enums::features::MeteredFeature,
        plans::UNLIMITED,
        usage::{UsageAttempt, UsageSnapshot, current_period_start},
    },
};

type CounterKey = (String, NaiveDate, MeteredFeature);

/// One counter per account, period and feature. Recording into a new period drops
/// the account's older periods, so memory stays bounded by the number of accounts.
#[derive(Debug, Default)]
pub struct InMemoryUsageCounters {
    counters: RwLock<HashMap<CounterKey, i64>>,
}

impl InMemoryUsageCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.counters.read().await.len()
    }
}

fn prune_older_periods(
    counters: &mut HashMap<CounterKey, i64>,
    account_id: &str,
    period_start: NaiveDate,
) {
    counters.retain(|(account, period, _), _| account != account_id || *period >= period_start);
}

#[async_trait]
impl UsageCounterRepository for InMemoryUsageCounters {
    async fn get_usage(&self, account_id: &str, period_start: NaiveDate) -> Result<UsageSnapshot> {
        let counters = self.counters.read().await;
        let count = |feature| {
            counters
                .get(&(account_id.to_string(), period_start, feature))
                .copied()
                .unwrap_or(0)
        };
        Ok(UsageSnapshot {
            curriculum_views: count(MeteredFeature::CurriculumViews),
            contacts: count(MeteredFeature::Contacts),
        })
    }

    async fn record(
        &self,
        account_id: &str,
        feature: MeteredFeature,
        occurred_on: NaiveDate,
    ) -> Result<()> {
        let period_start = current_period_start(occurred_on);
        let mut counters = self.counters.write().await;
        prune_older_periods(&mut counters, account_id, period_start);
        *counters
            .entry((account_id.to_string(), period_start, feature))
            .or_insert(0) += 1;
        Ok(())
    }

    async fn try_record(
        &self,
        account_id: &str,
        feature: MeteredFeature,
        occurred_on: NaiveDate,
        limit: i64,
    ) -> Result<UsageAttempt> {
        let period_start = current_period_start(occurred_on);
        let mut counters = self.counters.write().await;
        prune_older_periods(&mut counters, account_id, period_start);

        let used = counters
            .entry((account_id.to_string(), period_start, feature))
            .or_insert(0);
        if limit != UNLIMITED && *used >= limit {
            return Ok(UsageAttempt {
                recorded: false,
                used: *used,
            });
        }
        *used += 1;
        Ok(UsageAttempt {
            recorded: true,
            used: *used,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn counts_only_events_in_the_requested_period() {
        let counters = InMemoryUsageCounters::new();
        counters
            .record("7", MeteredFeature::Contacts, date(2024, 4, 30))
            .await
            .unwrap();
        counters
            .record("2", MeteredFeature::Contacts, date(2024, 5, 2))
            .await
            .unwrap();
        counters
            .record("2", MeteredFeature::CurriculumViews, date(2024, 5, 3))
            .await
            .unwrap();
        counters
            .record("7", MeteredFeature::Contacts, date(2024, 5, 3))
            .await
            .unwrap();

        let usage = counters.get_usage("2", date(2024, 5, 1)).await.unwrap();

        assert_eq!(
            usage,
            UsageSnapshot {
                curriculum_views: 1,
                contacts: 1
            }
        );
    }

    #[tokio::test]
    async fn unknown_account_has_zero_usage() {
        let counters = InMemoryUsageCounters::new();

        let usage = counters.get_usage("nobody", date(2024, 5, 1)).await.unwrap();

        assert_eq!(usage, UsageSnapshot::default());
    }

    #[tokio::test]
    async fn later_periods_are_not_counted_in_earlier_ones() {
        let counters = InMemoryUsageCounters::new();
        counters
            .record("2", MeteredFeature::Contacts, date(2024, 6, 3))
            .await
            .unwrap();

        let may = counters.get_usage("2", date(2024, 5, 1)).await.unwrap();
        let june = counters.get_usage("2", date(2024, 6, 1)).await.unwrap();

        assert_eq!(may.contacts, 0);
        assert_eq!(june.contacts, 1);
    }

    #[tokio::test]
    async fn recording_into_a_new_period_drops_older_counters() {
        let counters = InMemoryUsageCounters::new();
        for month in 1..=6 {
            counters
                .record("2", MeteredFeature::Contacts, date(2024, month, 10))
                .await
                .unwrap();
            counters
                .record("2", MeteredFeature::CurriculumViews, date(2024, month, 11))
                .await
                .unwrap();
        }
        counters
            .record("7", MeteredFeature::Contacts, date(2024, 1, 10))
            .await
            .unwrap();

        assert_eq!(counters.len().await, 3);
        let april = counters.get_usage("2", date(2024, 4, 1)).await.unwrap();
        assert_eq!(april, UsageSnapshot::default());
        let other = counters.get_usage("7", date(2024, 1, 1)).await.unwrap();
        assert_eq!(other.contacts, 1);
    }

    #[tokio::test]
    async fn try_record_stops_at_the_cap() {
        let counters = InMemoryUsageCounters::new();

        let first = counters
            .try_record("2", MeteredFeature::Contacts, date(2024, 5, 2), 1)
            .await
            .unwrap();
        let second = counters
            .try_record("2", MeteredFeature::Contacts, date(2024, 5, 3), 1)
            .await
            .unwrap();

        assert_eq!(
            first,
            UsageAttempt {
                recorded: true,
                used: 1
            }
        );
        assert_eq!(
            second,
            UsageAttempt {
                recorded: false,
                used: 1
            }
        );
    }

    #[tokio::test]
    async fn try_record_without_cap_always_records() {
        let counters = InMemoryUsageCounters::new();

        for _ in 0..3 {
            let attempt = counters
                .try_record("2", MeteredFeature::CurriculumViews, date(2024, 5, 2), UNLIMITED)
                .await
                .unwrap();
            assert!(attempt.recorded);
        }

        let usage = counters.get_usage("2", date(2024, 5, 1)).await.unwrap();
        assert_eq!(usage.curriculum_views, 3);
    }
}
