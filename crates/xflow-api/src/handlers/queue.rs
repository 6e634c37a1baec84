//! Waiting-room handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use validator::Validate;

use xflow_core::error::AppError;

use crate::dto::request::{AllowQuery, AllowedQuery, ClientQuery, RegisterQuery};
use crate::dto::response::{
    AllowUserResponse, AllowedUserResponse, RankNumberResponse, RegisterUserResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

fn validate(params: &impl Validate) -> Result<(), AppError> {
    params
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))
}

/// Name of the cookie carrying the admission token for `queue`.
pub fn token_cookie_name(queue: &str) -> String {
    format!("user-queue-{queue}-token")
}

/// POST /api/v1/queue
pub async fn register(
    State(state): State<AppState>,
    Query(params): Query<RegisterQuery>,
) -> ApiResult<Json<RegisterUserResponse>> {
    validate(&params)?;
    let rank = state
        .admission
        .register(&params.queue, &params.user_id.to_string())
        .await?;
    Ok(Json(RegisterUserResponse { rank }))
}

/// POST /api/v1/queue/allow
pub async fn allow(
    State(state): State<AppState>,
    Query(params): Query<AllowQuery>,
) -> ApiResult<Json<AllowUserResponse>> {
    validate(&params)?;
    let allowed = state.admission.promote(&params.queue, params.count).await?;
    Ok(Json(AllowUserResponse {
        requested_count: params.count,
        allowed_count: allowed,
    }))
}

/// GET /api/v1/queue/allowed
///
/// Checks the token only; it does not look at the proceed set.
pub async fn allowed(
    State(state): State<AppState>,
    Query(params): Query<AllowedQuery>,
) -> ApiResult<Json<AllowedUserResponse>> {
    validate(&params)?;
    let allowed =
        state
            .admission
            .verify_token(&params.queue, &params.user_id.to_string(), &params.token);
    Ok(Json(AllowedUserResponse { allowed }))
}

/// GET /api/v1/queue/rank
pub async fn rank(
    State(state): State<AppState>,
    Query(params): Query<ClientQuery>,
) -> ApiResult<Json<RankNumberResponse>> {
    validate(&params)?;
    let rank = state
        .admission
        .rank(&params.queue, &params.user_id.to_string())
        .await?;
    Ok(Json(RankNumberResponse { rank }))
}

/// GET /api/v1/queue/touch
///
/// Returns the admission token and sets it as a short-lived cookie.
pub async fn touch(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<ClientQuery>,
) -> ApiResult<(CookieJar, String)> {
    validate(&params)?;
    let token = state
        .admission
        .issue_token(&params.queue, &params.user_id.to_string());

    let token_config = &state.config.token;
    let cookie = Cookie::build((token_cookie_name(&params.queue), token.clone()))
        .max_age(time::Duration::seconds(token_config.cookie_max_age_seconds))
        .path(token_config.cookie_path.clone());

    Ok((jar.add(cookie), token))
}
