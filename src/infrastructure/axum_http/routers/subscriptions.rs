use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    application::usecases::subscriptions::SubscriptionUseCase,
    domain::value_objects::{
        plans::PlanDto,
        subscriptions::{CancelSubscriptionResponse, CurrentSubscriptionDto, InsertSubscriptionModel},
    },
    infrastructure::axum_http::{account_context::CurrentAccount, error_responses::AppError},
};

pub fn routes(subscriptions_usecase: Arc<SubscriptionUseCase>) -> Router {
    Router::new()
        .route("/plans", get(list_plans))
        .route("/current", get(current_subscription))
        .route("/subscribe", post(subscribe))
        .route("/cancel", post(cancel_subscription))
        .with_state(subscriptions_usecase)
}

pub async fn list_plans(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase>>,
) -> Result<impl IntoResponse, AppError> {
    let plans: Vec<PlanDto> = subscriptions_usecase
        .list_plans()
        .await?
        .into_iter()
        .map(PlanDto::from)
        .collect();

    Ok(Json(plans))
}

pub async fn current_subscription(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase>>,
    account: CurrentAccount,
) -> Result<impl IntoResponse, AppError> {
    let current = subscriptions_usecase
        .get_current_subscription(&account.account_id)
        .await?
        .ok_or_else(|| AppError::NotFound("no active subscription".to_string()))?;

    Ok(Json(current))
}

pub async fn subscribe(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase>>,
    account: CurrentAccount,
    Json(insert_subscription_model): Json<InsertSubscriptionModel>,
) -> Result<impl IntoResponse, AppError> {
    let plan_id = insert_subscription_model.plan_id.trim();
    if plan_id.is_empty() {
        return Err(AppError::BadRequest("plan_id is required".to_string()));
    }

    let subscription = subscriptions_usecase
        .create_subscription(&account.account_id, plan_id)
        .await?;
    let current = subscriptions_usecase
        .get_current_subscription(&account.account_id)
        .await?
        .unwrap_or_else(|| CurrentSubscriptionDto::new(subscription, None));

    Ok((StatusCode::CREATED, Json(current)))
}

pub async fn cancel_subscription(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase>>,
    account: CurrentAccount,
) -> Result<impl IntoResponse, AppError> {
    let cancelled = subscriptions_usecase
        .cancel_subscription(&account.account_id)
        .await?;
    if !cancelled {
        return Err(AppError::NotFound("no subscription to cancel".to_string()));
    }

    Ok(Json(CancelSubscriptionResponse { cancelled }))
}
