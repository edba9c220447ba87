use std::str::FromStr;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use garde::Validate;

use kernel::model::id::UserId;
use kernel::model::role::Role;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::extractor::AuthorizedUser;
use crate::model::user::{
    OwnerProfileResponse, ResetPasswordRequest, SignupRequest, SignupResponse,
    UpdateUserPasswordRequest, UpdateUserPasswordRequestWithUserId, UserResponse, UsersResponse,
};

/// Creates the login credential and its owner profile, then dispatches
/// the verification mail without blocking the response.
pub async fn signup(
    Path(role): Path<String>,
    State(registry): State<AppRegistry>,
    Json(req): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<SignupResponse>)> {
    req.validate(&())?;
    let role = Role::from_str(&role)
        .map_err(|_| AppError::UnprocessableEntity(format!("invalid role: {role}")))?;
    let to = req.email.clone();
    let name = req.full_name.clone();
    let user_id = registry
        .user_repository()
        .create(req.into_event(role))
        .await?;

    let mailer = registry.mailer();
    tokio::spawn(async move {
        let body = format!(
            "Hi {name},\n\nYour account has been created. Please verify your email \
             address by visiting /api/v1/auth/verify/{user_id} before logging in."
        );
        if let Err(e) = mailer.send(&to, "Verify your email address", &body).await {
            tracing::warn!(error.cause_chain = ?e, "failed to send verification mail");
        }
    });

    Ok((StatusCode::CREATED, Json(SignupResponse { user_id })))
}

pub async fn get_current_user(user: AuthorizedUser) -> Json<UserResponse> {
    Json(UserResponse::from(user.user))
}

pub async fn list_users(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<UsersResponse>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    registry
        .user_repository()
        .find_all()
        .await
        .map(UsersResponse::from)
        .map(Json)
}

pub async fn show_owner_profile(
    Path(login_id): Path<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<OwnerProfileResponse>> {
    registry
        .user_repository()
        .find_profile_by_login_id(login_id)
        .await
        .and_then(|profile| match profile {
            Some(profile) => Ok(Json(profile.into())),
            None => Err(AppError::EntityNotFound("owner profile not found".into())),
        })
}

/// Always answers 200 so callers cannot probe which emails exist; a
/// temporary password is issued and mailed out only for real accounts.
pub async fn reset_password(
    State(registry): State<AppRegistry>,
    Json(req): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;
    let to = req.email.clone();
    if let Some(temporary) = registry
        .user_repository()
        .reset_password(req.into())
        .await?
    {
        let mailer = registry.mailer();
        tokio::spawn(async move {
            let body = format!(
                "A temporary password was issued for your account: {temporary}\n\n\
                 Please log in with it and change your password right away."
            );
            if let Err(e) = mailer.send(&to, "Your temporary password", &body).await {
                tracing::warn!(error.cause_chain = ?e, "failed to send password reset mail");
            }
        });
    }
    Ok(StatusCode::OK)
}

pub async fn change_password(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateUserPasswordRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;
    let update = UpdateUserPasswordRequestWithUserId::new(user.id(), req);
    registry
        .user_repository()
        .update_password(update.into())
        .await
        .map(|_| StatusCode::OK)
}
