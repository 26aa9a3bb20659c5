use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    application::usecases::favorites::FavoriteUseCase,
    domain::value_objects::favorites::{FavoriteToggleResponse, InsertFavoriteModel},
    infrastructure::axum_http::{account_context::CurrentAccount, error_responses::AppError},
};

pub fn routes(favorites_usecase: Arc<FavoriteUseCase>) -> Router {
    Router::new()
        .route("/", get(list_favorites))
        .route("/:curriculum_id", post(add_favorite).delete(remove_favorite))
        .with_state(favorites_usecase)
}

pub async fn list_favorites(
    State(favorites_usecase): State<Arc<FavoriteUseCase>>,
    account: CurrentAccount,
) -> Result<impl IntoResponse, AppError> {
    let favorites = favorites_usecase.list(&account.account_id).await?;

    Ok(Json(favorites))
}

pub async fn add_favorite(
    State(favorites_usecase): State<Arc<FavoriteUseCase>>,
    account: CurrentAccount,
    Path(curriculum_id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let model = parse_favorite_body(&body)?;

    let changed = favorites_usecase
        .add(&account.account_id, &curriculum_id, model)
        .await?;
    let status = if changed {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(FavoriteToggleResponse {
            curriculum_id,
            changed,
        }),
    ))
}

/// An empty body saves the favorite without notes or tags; anything else must be
/// a valid favorite document.
fn parse_favorite_body(body: &[u8]) -> Result<InsertFavoriteModel, AppError> {
    if body.trim_ascii().is_empty() {
        return Ok(InsertFavoriteModel::default());
    }
    serde_json::from_slice(body)
        .map_err(|err| AppError::BadRequest(format!("invalid favorite body: {err}")))
}

pub async fn remove_favorite(
    State(favorites_usecase): State<Arc<FavoriteUseCase>>,
    account: CurrentAccount,
    Path(curriculum_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let changed = favorites_usecase
        .remove(&account.account_id, &curriculum_id)
        .await?;

    Ok(Json(FavoriteToggleResponse {
        curriculum_id,
        changed,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_body_means_no_notes() {
        let model = parse_favorite_body(b"  \n").unwrap();

        assert_eq!(model.notes, None);
        assert!(model.tags.is_empty());
    }

    #[test]
    fn malformed_body_is_rejected() {
        assert!(matches!(
            parse_favorite_body(br#"{"notes": "#),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            parse_favorite_body(br#"{"tags": "backend"}"#),
            Err(AppError::BadRequest(_))
        ));
    }
}
