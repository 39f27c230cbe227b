use axum::{
    debug_handler,
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};
use sqlx::SqlitePool;

use crate::{include_res, res, AppResult, SearchQuery};

use super::{message_item, room_item, topic_item};

#[debug_handler]
pub(crate) async fn home(
    State(db_pool): State<SqlitePool>,
    Query(SearchQuery { q }): Query<SearchQuery>,
) -> AppResult<Response> {
    let q = q.unwrap_or_default();
    let pattern = format!("%{q}%");

    let rooms: Vec<(String, String, String, String, String, String)> = sqlx::query_as(
        "SELECT r.id, r.name, t.name, u.id, u.username, r.description
         FROM rooms r
         JOIN topics t ON t.id = r.topic_id
         JOIN users u ON u.id = r.host_id
         WHERE t.name LIKE ?1 OR r.name LIKE ?1 OR r.description LIKE ?1
         ORDER BY r.updated_at DESC, r.created_at DESC",
    )
    .bind(&pattern)
    .fetch_all(&db_pool)
    .await?;

    let room_count = rooms.len();
    let mut room_items = String::new();
    for (id, name, topic, host_id, host, description) in &rooms {
        room_items += &room_item(id, name, topic, host_id, host, description);
    }

    let topics: Vec<(String, i64)> = sqlx::query_as(
        "SELECT t.name, COUNT(r.id)
         FROM topics t
         LEFT JOIN rooms r ON r.topic_id = t.id
         GROUP BY t.id
         LIMIT 5",
    )
    .fetch_all(&db_pool)
    .await?;

    let mut topic_items = String::new();
    for (name, count) in &topics {
        topic_items += &topic_item(name, *count);
    }

    let msgs: Vec<(String, String, String, String, String)> = sqlx::query_as(
        "SELECT m.id, u.id, u.username, m.created_at, m.body
         FROM messages m
         JOIN rooms r ON r.id = m.room_id
         JOIN topics t ON t.id = r.topic_id
         JOIN users u ON u.id = m.user_id
         WHERE t.name LIKE ?1
         ORDER BY m.created_at DESC",
    )
    .bind(&pattern)
    .fetch_all(&db_pool)
    .await?;

    let mut msg_items = String::new();
    for (id, user_id, username, created, body) in &msgs {
        msg_items += &message_item(id, user_id, username, created, body);
    }

    let page = include_res!(str, "/pages/home.html")
        .replace("{q}", &res::escape(&q))
        .replace("{room_count}", &room_count.to_string())
        .replace("{rooms}", &room_items)
        .replace("{topics}", &topic_items)
        .replace("{room_messages}", &msg_items);

    Ok(Html(page).into_response())
}
