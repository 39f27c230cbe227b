use axum::{
    debug_handler,
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};
use sqlx::SqlitePool;

use crate::{include_res, res, rooms, AppResult, SearchQuery};

#[debug_handler]
pub async fn topics(
    State(db_pool): State<SqlitePool>,
    Query(SearchQuery { q }): Query<SearchQuery>,
) -> AppResult<Response> {
    let q = q.unwrap_or_default();

    let topics: Vec<(String, i64)> = sqlx::query_as(
        "SELECT t.name, COUNT(r.id)
         FROM topics t
         LEFT JOIN rooms r ON r.topic_id = t.id
         WHERE t.name LIKE ?
         GROUP BY t.id",
    )
    .bind(format!("%{q}%"))
    .fetch_all(&db_pool)
    .await?;

    let mut topic_items = String::new();
    for (name, count) in &topics {
        topic_items += &rooms::topic_item(name, *count);
    }

    let page = include_res!(str, "/pages/topics.html")
        .replace("{q}", &res::escape(&q))
        .replace("{topics}", &topic_items);

    Ok(Html(page).into_response())
}
