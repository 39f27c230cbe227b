use axum::{
    debug_handler,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{include_res, res, session::{self, USER_ID}, AppResult};

use super::password;

#[derive(Deserialize)]
pub(crate) struct LoginForm {
    email: String,
    password: String,
}

/// Login and register share one page shell; each handler injects its own form.
pub(crate) async fn render_auth_page(session: &Session, form: &str) -> AppResult<Response> {
    let flash = session::take_flash(session).await?;
    let page = include_res!(str, "/pages/login_register.html")
        .replace("{form}", form)
        .replace("{flash}", &flash.as_deref().map(res::escape).unwrap_or_default());
    Ok(Html(page).into_response())
}

#[debug_handler]
pub(crate) async fn login_page(session: Session) -> AppResult<Response> {
    if session.get::<String>(USER_ID).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    render_auth_page(&session, include_res!(str, "/pages/login_form.html")).await
}

#[debug_handler]
pub(crate) async fn login(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(LoginForm { email, password }): Form<LoginForm>,
) -> AppResult<Response> {
    let email = email.to_lowercase();

    let row: Option<(String, String)> =
        sqlx::query_as("SELECT id,password_hash FROM users WHERE email=?")
            .bind(&email)
            .fetch_optional(&db_pool)
            .await?;

    let Some((user_id, password_hash)) = row else {
        session::set_flash(&session, "Email does not exist").await?;
        return render_auth_page(&session, include_res!(str, "/pages/login_form.html")).await;
    };

    if !password::verify(&password, &password_hash) {
        session::set_flash(&session, "Email or password does not exist").await?;
        return render_auth_page(&session, include_res!(str, "/pages/login_form.html")).await;
    }

    session.insert(USER_ID, user_id.clone()).await?;
    tracing::info!(%user_id, "signed in");

    Ok(Redirect::to("/").into_response())
}
