use anyhow::Result;
use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use crate::domain::{
    entities::{
        accounts::AccountEntity, favorites::FavoriteEntity, subscriptions::SubscriptionEntity,
    },
    repositories::{
        favorites::FavoriteRepository, subscriptions::SubscriptionRepository,
        usage_counters::UsageCounterRepository,
    },
    value_objects::{
        enums::{
            account_types::AccountType, features::MeteredFeature,
            subscription_statuses::SubscriptionStatus,
        },
        plans::PROFESSIONAL_PLAN_ID,
    },
};

use super::{
    accounts::InMemoryAccounts, favorites::InMemoryFavorites,
    subscriptions::InMemorySubscriptions, usage_counters::InMemoryUsageCounters,
};

/// Demo company account with an active professional subscription.
pub const DEMO_COMPANY_ID: &str = "2";

fn account(id: &str, name: &str, email: &str, account_type: AccountType) -> AccountEntity {
    AccountEntity {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        account_type,
    }
}

/// Loads the demo data set used when no database is configured.
pub async fn seed_demo_data(
    accounts: &InMemoryAccounts,
    subscriptions: &InMemorySubscriptions,
    usage_counters: &InMemoryUsageCounters,
    favorites: &InMemoryFavorites,
) -> Result<()> {
    accounts
        .insert(account("1", "João Silva", "joao@email.com", AccountType::Normal))
        .await;
    accounts
        .insert(account(
            DEMO_COMPANY_ID,
            "Tech Solutions",
            "empresa@tech.com",
            AccountType::Company,
        ))
        .await;
    accounts
        .insert(account("3", "Maria Santos", "maria@email.com", AccountType::Normal))
        .await;

    let start_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    let end_date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap_or_default();
    subscriptions
        .replace(SubscriptionEntity {
            account_id: DEMO_COMPANY_ID.to_string(),
            plan_id: PROFESSIONAL_PLAN_ID.to_string(),
            status: SubscriptionStatus::Active,
            start_date,
            anchor_date: start_date,
            end_date,
            auto_renew: true,
        })
        .await?;

    let today = Utc::now().date_naive();
    for (feature, count) in [
        (MeteredFeature::CurriculumViews, 23),
        (MeteredFeature::Contacts, 7),
    ] {
        for _ in 0..count {
            usage_counters
                .record(DEMO_COMPANY_ID, feature, today)
                .await?;
        }
    }

    favorites
        .insert(FavoriteEntity {
            id: Uuid::new_v4(),
            account_id: DEMO_COMPANY_ID.to_string(),
            curriculum_id: "1".to_string(),
            added_on: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap_or_default(),
            notes: Some("Excelente perfil para vaga de React Developer".to_string()),
            tags: vec![
                "React".to_string(),
                "Frontend".to_string(),
                "Senior".to_string(),
            ],
        })
        .await?;

    info!("seed: demo accounts, subscription, usage and favorites loaded");
    Ok(())
}
