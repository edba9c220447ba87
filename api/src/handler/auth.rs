use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use garde::Validate;

use kernel::model::auth::event::CreateToken;
use kernel::model::id::UserId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::extractor::AuthorizedUser;
use crate::model::auth::{LoginRequest, LoginResponse};

pub async fn login(
    State(registry): State<AppRegistry>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    req.validate(&())?;
    let user_id = registry
        .auth_repository()
        .verify_user(CreateToken::new(req.email, req.password))
        .await?;
    let access_token = registry.auth_repository().create_token(user_id).await?;
    let user = registry
        .user_repository()
        .find_current_user(user_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("user not found".into()))?;
    Ok(Json(LoginResponse {
        user_id,
        name: user.name,
        email: user.email,
        role: user.role.into(),
        avatar: user.avatar,
        access_token: access_token.0,
        token_type: "Bearer".into(),
    }))
}

pub async fn logout(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .auth_repository()
        .delete_token(user.access_token)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Landing point of the link mailed out at signup.
pub async fn verify_email(
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .user_repository()
        .activate(user_id)
        .await
        .map(|_| StatusCode::OK)
}
