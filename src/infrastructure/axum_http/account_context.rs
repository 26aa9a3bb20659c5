use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::error_responses::AppError;

/// Header carrying the caller's account id. Stands in for a real session.
pub const ACCOUNT_ID_HEADER: &str = "x-account-id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentAccount {
    pub account_id: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(ACCOUNT_ID_HEADER)
            .ok_or_else(|| AppError::Unauthorized("Missing X-Account-Id header".to_string()))?;

        let account_id = header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid X-Account-Id header".to_string()))?
            .trim();

        if account_id.is_empty() {
            return Err(AppError::Unauthorized(
                "Empty X-Account-Id header".to_string(),
            ));
        }

        Ok(CurrentAccount {
            account_id: account_id.to_string(),
        })
    }
}
