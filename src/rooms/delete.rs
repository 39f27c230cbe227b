use axum::{
    debug_handler,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use sqlx::SqlitePool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{auth, include_res, res, AppResult};

fn confirm_page(obj: &str, action: &str) -> Response {
    let page = include_res!(str, "/pages/delete.html")
        .replace("{obj}", &res::escape(obj))
        .replace("{action}", action);
    Html(page).into_response()
}

#[debug_handler]
pub(crate) async fn delete_room_page(
    Path(room_id): Path<Uuid>,
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let Some(user) = auth::current_user(&session, &db_pool).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let (host_id, name): (String, String) =
        sqlx::query_as("SELECT host_id,name FROM rooms WHERE id=?")
            .bind(room_id.to_string())
            .fetch_one(&db_pool)
            .await?;

    if host_id != user.id {
        return Ok(res::refusal());
    }

    Ok(confirm_page(&name, &format!("/r/{room_id}/delete")))
}

#[debug_handler]
pub(crate) async fn delete_room(
    Path(room_id): Path<Uuid>,
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let Some(user) = auth::current_user(&session, &db_pool).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let (host_id,): (String,) = sqlx::query_as("SELECT host_id FROM rooms WHERE id=?")
        .bind(room_id.to_string())
        .fetch_one(&db_pool)
        .await?;

    if host_id != user.id {
        return Ok(res::refusal());
    }

    // Messages and participant rows go with the room (ON DELETE CASCADE).
    sqlx::query("DELETE FROM rooms WHERE id=?")
        .bind(room_id.to_string())
        .execute(&db_pool)
        .await?;

    tracing::info!(room_id = %room_id, "room deleted");

    Ok(Redirect::to("/").into_response())
}

#[debug_handler]
pub async fn delete_message_page(
    Path(message_id): Path<Uuid>,
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let Some(user) = auth::current_user(&session, &db_pool).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let (author_id, body): (String, String) =
        sqlx::query_as("SELECT user_id,body FROM messages WHERE id=?")
            .bind(message_id.to_string())
            .fetch_one(&db_pool)
            .await?;

    if author_id != user.id {
        return Ok(res::refusal());
    }

    Ok(confirm_page(&body, &format!("/m/{message_id}/delete")))
}

#[debug_handler]
pub async fn delete_message(
    Path(message_id): Path<Uuid>,
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let Some(user) = auth::current_user(&session, &db_pool).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let (author_id,): (String,) = sqlx::query_as("SELECT user_id FROM messages WHERE id=?")
        .bind(message_id.to_string())
        .fetch_one(&db_pool)
        .await?;

    if author_id != user.id {
        return Ok(res::refusal());
    }

    sqlx::query("DELETE FROM messages WHERE id=?")
        .bind(message_id.to_string())
        .execute(&db_pool)
        .await?;

    Ok(Redirect::to("/").into_response())
}
