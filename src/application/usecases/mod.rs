pub mod entitlements;
pub mod favorites;
pub mod plan_resolver;
pub mod subscriptions;

use std::sync::Arc;

use crate::infrastructure::Repositories;

use entitlements::EntitlementUseCase;
use favorites::FavoriteUseCase;
use plan_resolver::PlanResolver;
use subscriptions::SubscriptionUseCase;

/// Use cases sharing one set of repositories.
#[derive(Clone)]
pub struct UseCases {
    pub subscriptions: Arc<SubscriptionUseCase>,
    pub entitlements: Arc<EntitlementUseCase>,
    pub favorites: Arc<FavoriteUseCase>,
}

impl UseCases {
    pub fn new(repositories: &Repositories) -> Self {
        let plan_resolver = Arc::new(PlanResolver::new(
            Arc::clone(&repositories.plans),
            Arc::clone(&repositories.subscriptions),
        ));

        let subscriptions = Arc::new(SubscriptionUseCase::new(
            Arc::clone(&repositories.plans),
            Arc::clone(&repositories.subscriptions),
        ));

        let entitlements = Arc::new(EntitlementUseCase::new(
            Arc::clone(&repositories.accounts),
            Arc::clone(&repositories.plans),
            Arc::clone(&repositories.usage_counters),
            plan_resolver,
        ));

        let favorites = Arc::new(FavoriteUseCase::new(
            Arc::clone(&repositories.favorites),
            Arc::clone(&entitlements),
        ));

        Self {
            subscriptions,
            entitlements,
            favorites,
        }
    }
}
