use axum::{
    debug_handler,
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};
use sqlx::SqlitePool;

use crate::{include_res, rooms, AppResult, SearchQuery};

#[debug_handler]
pub async fn activity(
    State(db_pool): State<SqlitePool>,
    Query(SearchQuery { q }): Query<SearchQuery>,
) -> AppResult<Response> {
    let q = q.unwrap_or_default();

    let msgs: Vec<(String, String, String, String, String)> = sqlx::query_as(
        "SELECT m.id, u.id, u.username, m.created_at, m.body
         FROM messages m
         JOIN rooms r ON r.id = m.room_id
         JOIN topics t ON t.id = r.topic_id
         JOIN users u ON u.id = m.user_id
         WHERE t.name LIKE ?
         ORDER BY m.created_at DESC",
    )
    .bind(format!("%{q}%"))
    .fetch_all(&db_pool)
    .await?;

    let mut msg_items = String::new();
    for (id, user_id, username, created, body) in &msgs {
        msg_items += &rooms::message_item(id, user_id, username, created, body);
    }

    let page = include_res!(str, "/pages/activity.html").replace("{room_messages}", &msg_items);

    Ok(Html(page).into_response())
}
