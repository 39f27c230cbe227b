use axum::{
    debug_handler,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use sqlx::SqlitePool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{auth, db, include_res, res, AppResult};

use super::new::{topic_options, RoomForm};

#[debug_handler]
pub(crate) async fn edit_room_page(
    Path(room_id): Path<Uuid>,
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let Some(user) = auth::current_user(&session, &db_pool).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let room = sqlx::query_as::<_, db::Room>(
        "SELECT id,host_id,topic_id,name,description,created_at,updated_at FROM rooms WHERE id=?",
    )
    .bind(room_id.to_string())
    .fetch_one(&db_pool)
    .await?;

    if room.host_id != user.id {
        return Ok(res::refusal());
    }

    let (topic,): (String,) = sqlx::query_as("SELECT name FROM topics WHERE id=?")
        .bind(&room.topic_id)
        .fetch_one(&db_pool)
        .await?;

    let page = include_res!(str, "/pages/room_form.html")
        .replace("{title}", "Update Room")
        .replace("{action}", &format!("/r/{room_id}/edit"))
        .replace("{topic}", &res::escape(&topic))
        .replace("{name}", &res::escape(&room.name))
        .replace("{description}", &res::escape(&room.description))
        .replace("{topic_options}", &topic_options(&db_pool).await?);

    Ok(Html(page).into_response())
}

#[debug_handler]
pub(crate) async fn edit_room(
    Path(room_id): Path<Uuid>,
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(RoomForm { topic, name, description }): Form<RoomForm>,
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

    let topic_id = db::get_or_create_topic(&db_pool, &topic).await?;

    sqlx::query(
        "UPDATE rooms SET name=?, topic_id=?, description=?, updated_at=datetime('now') WHERE id=?",
    )
    .bind(&name)
    .bind(&topic_id)
    .bind(&description)
    .bind(room_id.to_string())
    .execute(&db_pool)
    .await?;

    Ok(Redirect::to("/").into_response())
}
