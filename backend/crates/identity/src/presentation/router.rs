//! Identity Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::domain::repository::IdentityRepository;
use crate::presentation::handlers::{self, IdentityAppState};

/// Create the Identity router for any repository implementation
pub fn identity_router<R>(repo: R, config: IdentityConfig) -> Router
where
    R: IdentityRepository + Clone + Send + Sync + 'static,
{
    let state = IdentityAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/users", get(handlers::list_identities::<R>))
        .route("/current-user", get(handlers::current_identity::<R>))
        .route("/logout", post(handlers::logout))
        .with_state(state)
}
