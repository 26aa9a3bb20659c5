use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::favorites::FavoriteEntity,
    repositories::favorites::FavoriteRepository,
    value_objects::{enums::features::Feature, favorites::InsertFavoriteModel},
};

use super::entitlements::EntitlementUseCase;

#[derive(Debug, Error)]
pub enum FavoriteError {
    #[error("favorites are available to company accounts only")]
    NotCompanyAccount,
    #[error("saving favorites requires an upgraded plan")]
    UpgradeRequired,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl FavoriteError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            FavoriteError::NotCompanyAccount => StatusCode::FORBIDDEN,
            FavoriteError::UpgradeRequired => StatusCode::PAYMENT_REQUIRED,
            FavoriteError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type FavoriteResult<T> = std::result::Result<T, FavoriteError>;

pub struct FavoriteUseCase {
    favorite_repo: Arc<dyn FavoriteRepository + Send + Sync>,
    entitlements: Arc<EntitlementUseCase>,
}

impl FavoriteUseCase {
    pub fn new(
        favorite_repo: Arc<dyn FavoriteRepository + Send + Sync>,
        entitlements: Arc<EntitlementUseCase>,
    ) -> Self {
        Self {
            favorite_repo,
            entitlements,
        }
    }

    pub async fn list(&self, account_id: &str) -> FavoriteResult<Vec<FavoriteEntity>> {
        Ok(self.favorite_repo.list_by_account(account_id).await?)
    }

    /// Saves a curriculum for the account. Returns `false` when it was already saved.
    pub async fn add(
        &self,
        account_id: &str,
        curriculum_id: &str,
        model: InsertFavoriteModel,
    ) -> FavoriteResult<bool> {
        let is_company = self
            .entitlements
            .is_company_account(account_id)
            .await
            .map_err(|err| FavoriteError::Internal(err.into()))?;
        if !is_company {
            let err = FavoriteError::NotCompanyAccount;
            warn!(
                %account_id,
                %curriculum_id,
                status = err.status_code().as_u16(),
                "favorites: save denied for non-company account"
            );
            return Err(err);
        }

        if !self
            .entitlements
            .evaluate_feature(account_id, Feature::SaveFavorites)
            .await
        {
            warn!(
                %account_id,
                %curriculum_id,
                "favorites: save denied without entitlement"
            );
            return Err(FavoriteError::UpgradeRequired);
        }

        let favorite = FavoriteEntity {
            id: Uuid::new_v4(),
            account_id: account_id.to_string(),
            curriculum_id: curriculum_id.to_string(),
            added_on: Utc::now().date_naive(),
            notes: model.notes,
            tags: model.tags,
        };

        let inserted = self.favorite_repo.insert(favorite).await.map_err(|err| {
            error!(
                %account_id,
                %curriculum_id,
                db_error = ?err,
                "favorites: failed to store favorite"
            );
            FavoriteError::Internal(err)
        })?;

        if inserted {
            info!(%account_id, %curriculum_id, "favorites: curriculum saved");
        }
        Ok(inserted)
    }

    pub async fn remove(&self, account_id: &str, curriculum_id: &str) -> FavoriteResult<bool> {
        let removed = self.favorite_repo.remove(account_id, curriculum_id).await?;
        if removed {
            info!(%account_id, %curriculum_id, "favorites: curriculum removed");
        }
        Ok(removed)
    }

    pub async fn is_favorite(&self, account_id: &str, curriculum_id: &str) -> FavoriteResult<bool> {
        Ok(self.favorite_repo.exists(account_id, curriculum_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::usecases::plan_resolver::PlanResolver,
        domain::{
            entities::{accounts::AccountEntity, subscriptions::SubscriptionEntity},
            repositories::{
                favorites::MockFavoriteRepository, subscriptions::SubscriptionRepository,
            },
            value_objects::{
                enums::{account_types::AccountType, subscription_statuses::SubscriptionStatus},
                plans::PROFESSIONAL_PLAN_ID,
            },
        },
        infrastructure::memory::{
            accounts::InMemoryAccounts, favorites::InMemoryFavorites, plan_catalog::PlanCatalog,
            subscriptions::InMemorySubscriptions, usage_counters::InMemoryUsageCounters,
        },
    };
    use chrono::NaiveDate;

    async fn entitlements(subscribed: bool) -> Arc<EntitlementUseCase> {
        let accounts = Arc::new(InMemoryAccounts::new());
        accounts
            .insert(AccountEntity {
                id: "1".to_string(),
                name: "João Silva".to_string(),
                email: "joao@email.com".to_string(),
                account_type: AccountType::Normal,
            })
            .await;
        accounts
            .insert(AccountEntity {
                id: "2".to_string(),
                name: "Tech Solutions".to_string(),
                email: "empresa@tech.com".to_string(),
                account_type: AccountType::Company,
            })
            .await;

        let subscriptions = Arc::new(InMemorySubscriptions::new());
        if subscribed {
            subscriptions
                .replace(SubscriptionEntity {
                    account_id: "2".to_string(),
                    plan_id: PROFESSIONAL_PLAN_ID.to_string(),
                    status: SubscriptionStatus::Active,
                    start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    anchor_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    end_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                    auto_renew: true,
                })
                .await
                .unwrap();
        }

        let plans = Arc::new(PlanCatalog::default_catalog());
        let resolver = Arc::new(PlanResolver::new(plans.clone(), subscriptions));
        Arc::new(EntitlementUseCase::new(
            accounts,
            plans,
            Arc::new(InMemoryUsageCounters::new()),
            resolver,
        ))
    }

    #[tokio::test]
    async fn subscribed_company_can_save_once() {
        let usecase = FavoriteUseCase::new(
            Arc::new(InMemoryFavorites::new()),
            entitlements(true).await,
        );
        let model = InsertFavoriteModel {
            notes: Some("strong React background".to_string()),
            tags: vec!["frontend".to_string()],
        };

        assert!(usecase.add("2", "1", model.clone()).await.unwrap());
        assert!(!usecase.add("2", "1", model).await.unwrap());
        assert!(usecase.is_favorite("2", "1").await.unwrap());

        let saved = usecase.list("2").await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].tags, vec!["frontend".to_string()]);
    }

    #[tokio::test]
    async fn free_company_needs_upgrade_to_save() {
        let mut favorite_repo = MockFavoriteRepository::new();
        favorite_repo.expect_insert().never();

        let usecase = FavoriteUseCase::new(Arc::new(favorite_repo), entitlements(false).await);

        let err = usecase
            .add("2", "1", InsertFavoriteModel::default())
            .await
            .unwrap_err();

        assert!(matches!(err, FavoriteError::UpgradeRequired));
        assert_eq!(err.status_code(), axum::http::StatusCode::PAYMENT_REQUIRED);
    }

    #[tokio::test]
    async fn normal_account_is_refused_rather_than_upsold() {
        let mut favorite_repo = MockFavoriteRepository::new();
        favorite_repo.expect_insert().never();

        let usecase = FavoriteUseCase::new(Arc::new(favorite_repo), entitlements(true).await);

        for account_id in ["1", "404"] {
            let err = usecase
                .add(account_id, "3", InsertFavoriteModel::default())
                .await
                .unwrap_err();

            assert!(matches!(err, FavoriteError::NotCompanyAccount));
            assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);
        }
    }

    #[tokio::test]
    async fn remove_reports_whether_anything_changed() {
        let usecase = FavoriteUseCase::new(
            Arc::new(InMemoryFavorites::new()),
            entitlements(true).await,
        );
        usecase
            .add("2", "7", InsertFavoriteModel::default())
            .await
            .unwrap();

        assert!(usecase.remove("2", "7").await.unwrap());
        assert!(!usecase.remove("2", "7").await.unwrap());
        assert!(!usecase.is_favorite("2", "7").await.unwrap());
    }
}
