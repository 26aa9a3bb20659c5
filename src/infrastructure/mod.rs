pub mod axum_http;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use anyhow::Result;

use crate::domain::repositories::{
    accounts::AccountRepository, favorites::FavoriteRepository, plans::PlanRepository,
    subscriptions::SubscriptionRepository, usage_counters::UsageCounterRepository,
};
use memory::{
    accounts::InMemoryAccounts, favorites::InMemoryFavorites, plan_catalog::PlanCatalog,
    seed::seed_demo_data, subscriptions::InMemorySubscriptions,
    usage_counters::InMemoryUsageCounters,
};
use postgres::{
    postgres_connection::PgPoolSquad,
    repositories::{
        accounts::AccountPostgres, favorites::FavoritePostgres,
        subscriptions::SubscriptionPostgres, usage_counters::UsageCounterPostgres,
    },
};

/// Storage backends the use cases are wired against.
#[derive(Clone)]
pub struct Repositories {
    pub plans: Arc<dyn PlanRepository + Send + Sync>,
    pub accounts: Arc<dyn AccountRepository + Send + Sync>,
    pub subscriptions: Arc<dyn SubscriptionRepository + Send + Sync>,
    pub usage_counters: Arc<dyn UsageCounterRepository + Send + Sync>,
    pub favorites: Arc<dyn FavoriteRepository + Send + Sync>,
}

impl Repositories {
    /// In-memory stores loaded with the demo data set.
    pub async fn in_memory_seeded() -> Result<Self> {
        let accounts = Arc::new(InMemoryAccounts::new());
        let subscriptions = Arc::new(InMemorySubscriptions::new());
        let usage_counters = Arc::new(InMemoryUsageCounters::new());
        let favorites = Arc::new(InMemoryFavorites::new());

        seed_demo_data(&accounts, &subscriptions, &usage_counters, &favorites).await?;

        Ok(Self {
            plans: Arc::new(PlanCatalog::default_catalog()),
            accounts,
            subscriptions,
            usage_counters,
            favorites,
        })
    }

    /// Postgres-backed mutable stores. The plan catalog stays static.
    pub fn postgres(db_pool: Arc<PgPoolSquad>) -> Self {
        Self {
            plans: Arc::new(PlanCatalog::default_catalog()),
            accounts: Arc::new(AccountPostgres::new(Arc::clone(&db_pool))),
            subscriptions: Arc::new(SubscriptionPostgres::new(Arc::clone(&db_pool))),
            usage_counters: Arc::new(UsageCounterPostgres::new(Arc::clone(&db_pool))),
            favorites: Arc::new(FavoritePostgres::new(db_pool)),
        }
    }
}
