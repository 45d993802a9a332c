//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use kernel::page::{Page, PageRequest};
use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::application::{
    AuthenticateInput, AuthenticateUseCase, CurrentIdentityUseCase, ListIdentitiesUseCase,
    RegisterInput, RegisterUseCase, RegistrationOutcome,
};
use crate::domain::repository::IdentityRepository;
use crate::error::{IdentityError, IdentityResult};
use crate::presentation::dto::{
    CurrentIdentityResponse, IdentityResponse, ListIdentitiesQuery, LoginRequest, LoginResponse,
    MessageResponse, RegisterRequest, RegisterResponse,
};

/// Shared state for identity handlers
#[derive(Clone)]
pub struct IdentityAppState<R>
where
    R: IdentityRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<IdentityConfig>,
}

/// Unparseable JSON bodies are client input errors
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> IdentityResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| IdentityError::validation(rejection.body_text()))
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/identity/register
pub async fn register<R>(
    State(state): State<IdentityAppState<R>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> IdentityResult<(StatusCode, Json<RegisterResponse>)>
where
    R: IdentityRepository + Clone + Send + Sync + 'static,
{
    let req = json_body(payload)?;
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let input = RegisterInput {
        name: req.name,
        email: req.email,
        password: req.password,
        auth_provider: req.auth_provider,
        avatar_ref: req.avatar_ref,
        date_of_birth: req.date_of_birth,
    };

    let output = use_case.execute(input).await?;

    let status = match output.outcome {
        RegistrationOutcome::Created => StatusCode::CREATED,
        RegistrationOutcome::Existing => StatusCode::OK,
    };

    Ok((
        status,
        Json(RegisterResponse {
            identity: output.identity.into(),
            message: output.outcome.as_str(),
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/identity/login
pub async fn login<R>(
    State(state): State<IdentityAppState<R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> IdentityResult<Json<LoginResponse>>
where
    R: IdentityRepository + Clone + Send + Sync + 'static,
{
    let req = json_body(payload)?;
    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(AuthenticateInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
        token_type: output.token_type,
        expires_at: output.expires_at,
        identity: output.identity.into(),
    }))
}

// ============================================================================
// Listing
// ============================================================================

/// GET /api/identity/users?page=&pageSize=
pub async fn list_identities<R>(
    State(state): State<IdentityAppState<R>>,
    Query(query): Query<ListIdentitiesQuery>,
) -> IdentityResult<Json<Page<IdentityResponse>>>
where
    R: IdentityRepository + Clone + Send + Sync + 'static,
{
    let request = PageRequest::from_query(query.page.as_deref(), query.page_size.as_deref());
    let use_case = ListIdentitiesUseCase::new(state.repo.clone());

    let page = use_case.execute(request).await?;

    Ok(Json(page.map(IdentityResponse::from)))
}

// ============================================================================
// Current Identity
// ============================================================================

/// GET /api/identity/current-user
pub async fn current_identity<R>(
    State(state): State<IdentityAppState<R>>,
    headers: HeaderMap,
) -> IdentityResult<Json<CurrentIdentityResponse>>
where
    R: IdentityRepository + Clone + Send + Sync + 'static,
{
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let use_case = CurrentIdentityUseCase::new(state.repo.clone(), state.config.clone());
    let identity = use_case.execute(authorization).await?;

    Ok(Json(CurrentIdentityResponse {
        identity: identity.into(),
    }))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/identity/logout
///
/// Tokens are stateless; the client discards its copy.
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Logged out successfully",
    })
}
