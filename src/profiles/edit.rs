use axum::{
    debug_handler,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{auth, include_res, res, AppResult};

#[derive(Deserialize)]
pub(crate) struct ProfileForm {
    username: String,
    email: String,
    bio: String,
    avatar: String,
}

#[debug_handler]
pub(crate) async fn edit_profile_page(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let Some(user) = auth::current_user(&session, &db_pool).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let page = include_res!(str, "/pages/update_user.html")
        .replace("{username}", &res::escape(&user.username))
        .replace("{email}", &res::escape(&user.email))
        .replace("{bio}", &res::escape(user.bio.as_deref().unwrap_or("")))
        .replace("{avatar}", &res::escape(user.avatar.as_deref().unwrap_or("")));

    Ok(Html(page).into_response())
}

#[debug_handler]
pub(crate) async fn edit_profile(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(ProfileForm { username, email, bio, avatar }): Form<ProfileForm>,
) -> AppResult<Response> {
    let Some(user) = auth::current_user(&session, &db_pool).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    // Empty optional fields go back to NULL rather than empty strings.
    let bio = Some(bio).filter(|b| !b.trim().is_empty());
    let avatar = Some(avatar).filter(|a| !a.trim().is_empty());

    sqlx::query("UPDATE users SET username=?, email=?, bio=?, avatar=? WHERE id=?")
        .bind(&username)
        .bind(email.to_lowercase())
        .bind(&bio)
        .bind(&avatar)
        .bind(&user.id)
        .execute(&db_pool)
        .await?;

    Ok(Redirect::to(&format!("/p/{}", user.id)).into_response())
}
