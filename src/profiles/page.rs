use axum::{
    debug_handler,
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{include_res, res, rooms, AppResult};

#[debug_handler]
pub(crate) async fn profile(
    Path(user_id): Path<Uuid>,
    State(db_pool): State<SqlitePool>,
) -> AppResult<Response> {
    let (username, bio, avatar): (String, Option<String>, Option<String>) =
        sqlx::query_as("SELECT username,bio,avatar FROM users WHERE id=?")
            .bind(user_id.to_string())
            .fetch_one(&db_pool)
            .await?;

    let hosted: Vec<(String, String, String, String, String, String)> = sqlx::query_as(
        "SELECT r.id, r.name, t.name, u.id, u.username, r.description
         FROM rooms r
         JOIN topics t ON t.id = r.topic_id
         JOIN users u ON u.id = r.host_id
         WHERE r.host_id=?
         ORDER BY r.updated_at DESC",
    )
    .bind(user_id.to_string())
    .fetch_all(&db_pool)
    .await?;

    let mut room_items = String::new();
    for (id, name, topic, host_id, host, description) in &hosted {
        room_items += &rooms::room_item(id, name, topic, host_id, host, description);
    }

    let msgs: Vec<(String, String, String, String, String)> = sqlx::query_as(
        "SELECT m.id, u.id, u.username, m.created_at, m.body
         FROM messages m
         JOIN users u ON u.id = m.user_id
         WHERE m.user_id=?
         ORDER BY m.created_at DESC",
    )
    .bind(user_id.to_string())
    .fetch_all(&db_pool)
    .await?;

    let mut msg_items = String::new();
    for (id, author_id, author, created, body) in &msgs {
        msg_items += &rooms::message_item(id, author_id, author, created, body);
    }

    let topics: Vec<(String, i64)> = sqlx::query_as(
        "SELECT t.name, COUNT(r.id)
         FROM topics t
         LEFT JOIN rooms r ON r.topic_id = t.id
         GROUP BY t.id",
    )
    .fetch_all(&db_pool)
    .await?;

    let mut topic_items = String::new();
    for (name, count) in &topics {
        topic_items += &rooms::topic_item(name, *count);
    }

    let avatar_html = avatar
        .as_deref()
        .filter(|a| !a.is_empty())
        .map(|a| format!("<img class=\"avatar\" src=\"{}\" alt=\"avatar\">", res::escape(a)))
        .unwrap_or_default();

    let page = include_res!(str, "/pages/profile.html")
        .replace("{username}", &res::escape(&username))
        .replace("{bio}", &res::escape(bio.as_deref().unwrap_or("")))
        .replace("{avatar}", &avatar_html)
        .replace("{rooms}", &room_items)
        .replace("{room_messages}", &msg_items)
        .replace("{topics}", &topic_items);

    Ok(Html(page).into_response())
}
