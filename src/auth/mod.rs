mod login;
mod logout;
mod register;

pub mod password;

use axum::{routing::get, Router};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{db::User, session::USER_ID, AppResult, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login::login_page).post(login::login))
        .route("/logout", get(logout::logout))
        .route("/register", get(register::register_page).post(register::register))
}

pub(crate) async fn current_user(session: &Session, pool: &SqlitePool) -> AppResult<Option<User>> {
    let Some(user_id) = session.get::<String>(USER_ID).await? else {
        return Ok(None);
    };

    let user = sqlx::query_as::<_, User>(
        "SELECT id,email,username,password_hash,bio,avatar FROM users WHERE id=?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}
