use axum::{
    debug_handler,
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{include_res, session::{self, USER_ID}, AppResult};

use super::{login::render_auth_page, password};

#[derive(Deserialize)]
pub(crate) struct RegisterForm {
    username: String,
    email: String,
    password1: String,
    password2: String,
}

fn validate(form: &RegisterForm) -> Result<(), &'static str> {
    if form.username.trim().is_empty() || form.email.trim().is_empty() {
        return Err("Username and email are required");
    }
    if form.password1 != form.password2 {
        return Err("Passwords do not match");
    }
    if form.password1.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

#[debug_handler]
pub(crate) async fn register_page(session: Session) -> AppResult<Response> {
    render_auth_page(&session, include_res!(str, "/pages/register_form.html")).await
}

#[debug_handler]
pub(crate) async fn register(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    if let Err(msg) = validate(&form) {
        session::set_flash(&session, msg).await?;
        return render_auth_page(&session, include_res!(str, "/pages/register_form.html")).await;
    }

    let email = form.email.to_lowercase();
    let taken: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM users WHERE email=?")
        .bind(&email)
        .fetch_optional(&db_pool)
        .await?;
    if taken.is_some() {
        session::set_flash(&session, "An account with this email already exists").await?;
        return render_auth_page(&session, include_res!(str, "/pages/register_form.html")).await;
    }

    let user_id = Uuid::now_v7().to_string();
    let username = form.username.to_lowercase();
    sqlx::query("INSERT INTO users (id,email,username,password_hash) VALUES (?,?,?,?)")
        .bind(&user_id)
        .bind(&email)
        .bind(&username)
        .bind(password::hash(&form.password1)?)
        .execute(&db_pool)
        .await?;

    session.insert(USER_ID, user_id.clone()).await?;
    tracing::info!(%user_id, %username, "registered");

    Ok(Redirect::to("/").into_response())
}
