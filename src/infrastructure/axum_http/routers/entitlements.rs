use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};

use crate::{
    application::usecases::entitlements::EntitlementUseCase,
    domain::value_objects::{
        entitlements::UsageDecisionDto,
        enums::features::{Feature, MeteredFeature},
        plans::PlanDto,
    },
    infrastructure::axum_http::{account_context::CurrentAccount, error_responses::AppError},
};

pub fn routes(entitlements_usecase: Arc<EntitlementUseCase>) -> Router {
    Router::new()
        .route("/plan", get(effective_plan))
        .route("/features/:feature", get(feature_decision))
        .route("/usage", get(usage_overview))
        .route("/usage/:metered", get(usage_decision).post(record_usage))
        .with_state(entitlements_usecase)
}

pub async fn effective_plan(
    State(entitlements_usecase): State<Arc<EntitlementUseCase>>,
    account: CurrentAccount,
) -> Result<impl IntoResponse, AppError> {
    let plan = entitlements_usecase.resolve_plan(&account.account_id).await?;

    Ok(Json(PlanDto::from(plan)))
}

pub async fn feature_decision(
    State(entitlements_usecase): State<Arc<EntitlementUseCase>>,
    account: CurrentAccount,
    Path(feature): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let feature = Feature::from_str(&feature)
        .ok_or_else(|| AppError::BadRequest(format!("unknown feature: {feature}")))?;

    let decision = entitlements_usecase
        .feature_decision(&account.account_id, feature)
        .await;

    Ok(Json(decision))
}

pub async fn usage_overview(
    State(entitlements_usecase): State<Arc<EntitlementUseCase>>,
    account: CurrentAccount,
) -> Result<impl IntoResponse, AppError> {
    let overview = entitlements_usecase
        .usage_overview(&account.account_id)
        .await?
        .ok_or_else(|| AppError::Forbidden("usage applies to company accounts only".to_string()))?;

    Ok(Json(overview))
}

pub async fn usage_decision(
    State(entitlements_usecase): State<Arc<EntitlementUseCase>>,
    account: CurrentAccount,
    Path(metered): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let metered = parse_metered(&metered)?;

    let decision = entitlements_usecase
        .evaluate_usage(&account.account_id, metered)
        .await;

    Ok(Json(UsageDecisionDto::new(metered, decision)))
}

pub async fn record_usage(
    State(entitlements_usecase): State<Arc<EntitlementUseCase>>,
    account: CurrentAccount,
    Path(metered): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let metered = parse_metered(&metered)?;

    let decision = entitlements_usecase
        .record_usage(&account.account_id, metered)
        .await?;

    Ok(Json(UsageDecisionDto::new(metered, decision)))
}

fn parse_metered(raw: &str) -> Result<MeteredFeature, AppError> {
    MeteredFeature::from_str(raw)
        .ok_or_else(|| AppError::BadRequest(format!("unknown metered feature: {raw}")))
}
