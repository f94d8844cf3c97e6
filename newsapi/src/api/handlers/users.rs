use crate::AppState;
use crate::api::models::users::{UserEnvelope, UserResponse, UsersEnvelope};
use crate::db::handlers::{Repository, Users};
use crate::errors::{Error, ErrorBody, Result};
use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    summary = "List users",
    responses(
        (status = 200, description = "All users", body = UsersEnvelope),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UsersEnvelope>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let users = Users::new(&mut conn).list(&()).await?;

    Ok(Json(UsersEnvelope {
        users: users.into_iter().map(UserResponse::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/users/{username}",
    tag = "users",
    summary = "Get user",
    params(
        ("username" = String, Path, description = "Username to look up"),
    ),
    responses(
        (status = 200, description = "User details", body = UserEnvelope),
        (status = 400, description = "Username is not valid UTF-8", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_user(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<UserEnvelope>> {
    let Path(username) = path?;
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let user = Users::new(&mut conn).get_by_id(username).await?.ok_or_else(|| Error::NotFound {
        resource: "username".to_string(),
    })?;

    Ok(Json(UserEnvelope { user: user.into() }))
}
