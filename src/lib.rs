pub mod activity;
pub mod appresult;
pub mod auth;
pub mod db;
pub mod profiles;
pub mod res;
pub mod rooms;
pub mod session;
pub mod topics;

pub use appresult::{AppError, AppResult};

use axum::{extract::FromRef, routing::get, Router};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
}

/// Shared `?q=` query for the browse pages.
#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

pub fn app(state: AppState) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::hours(2)));

    Router::new()
        .route("/", get(rooms::home))
        .route("/topics", get(topics::topics))
        .route("/activity", get(activity::activity))
        .route(
            "/m/{id}/delete",
            get(rooms::delete_message_page).post(rooms::delete_message),
        )
        .merge(auth::router())
        .nest("/r", rooms::router())
        .nest("/p", profiles::router())
        .with_state(state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
}
