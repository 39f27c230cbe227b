use axum::{
    debug_handler,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{auth, include_res, res, AppResult};

use super::message_item;

#[debug_handler]
pub(crate) async fn room(
    Path(room_id): Path<Uuid>,
    State(db_pool): State<SqlitePool>,
) -> AppResult<Response> {
    let (name, description, topic, host_id, host, created): (String, String, String, String, String, String) =
        sqlx::query_as(
            "SELECT r.name, r.description, t.name, u.id, u.username, r.created_at
             FROM rooms r
             JOIN topics t ON t.id = r.topic_id
             JOIN users u ON u.id = r.host_id
             WHERE r.id=?",
        )
        .bind(room_id.to_string())
        .fetch_one(&db_pool)
        .await?;

    let msgs: Vec<(String, String, String, String, String)> = sqlx::query_as(
        "SELECT m.id, u.id, u.username, m.created_at, m.body
         FROM messages m
         JOIN users u ON u.id = m.user_id
         WHERE m.room_id=?
         ORDER BY m.created_at ASC",
    )
    .bind(room_id.to_string())
    .fetch_all(&db_pool)
    .await?;

    let mut msg_items = String::new();
    for (id, user_id, username, created, body) in &msgs {
        msg_items += &message_item(id, user_id, username, created, body);
    }

    let participants: Vec<(String, String)> = sqlx::query_as(
        "SELECT u.id, u.username
         FROM participants p
         JOIN users u ON u.id = p.user_id
         WHERE p.room_id=?",
    )
    .bind(room_id.to_string())
    .fetch_all(&db_pool)
    .await?;

    let mut participant_items = String::new();
    for (user_id, username) in &participants {
        participant_items += &include_res!(str, "/pages/participant_item.html")
            .replace("{id}", user_id)
            .replace("{username}", &res::escape(username));
    }

    let page = include_res!(str, "/pages/room.html")
        .replace("{id}", &room_id.to_string())
        .replace("{name}", &res::escape(&name))
        .replace("{topic}", &res::escape(&topic))
        .replace("{host_id}", &host_id)
        .replace("{host}", &res::escape(&host))
        .replace("{created}", &created)
        .replace("{description}", &res::escape(&description))
        .replace("{messages}", &msg_items)
        .replace("{participants}", &participant_items);

    Ok(Html(page).into_response())
}

#[derive(Deserialize)]
pub(crate) struct MessageForm {
    body: String,
}

#[debug_handler]
pub(crate) async fn post_message(
    Path(room_id): Path<Uuid>,
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(MessageForm { body }): Form<MessageForm>,
) -> AppResult<Response> {
    let Some(user) = auth::current_user(&session, &db_pool).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    // Posting into a room that doesn't exist is a hard error, not a user-facing one.
    sqlx::query_as::<_, (i64,)>("SELECT 1 FROM rooms WHERE id=?")
        .bind(room_id.to_string())
        .fetch_one(&db_pool)
        .await?;

    sqlx::query("INSERT INTO messages (id,room_id,user_id,body) VALUES (?,?,?,?)")
        .bind(Uuid::now_v7().to_string())
        .bind(room_id.to_string())
        .bind(&user.id)
        .bind(&body)
        .execute(&db_pool)
        .await?;

    // Speaking in a room makes you a participant; re-posting is a no-op.
    sqlx::query("INSERT OR IGNORE INTO participants (room_id,user_id) VALUES (?,?)")
        .bind(room_id.to_string())
        .bind(&user.id)
        .execute(&db_pool)
        .await?;

    Ok(Redirect::to(&format!("/r/{room_id}")).into_response())
}
