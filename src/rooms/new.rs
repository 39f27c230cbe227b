use axum::{
    debug_handler,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{auth, db, include_res, res, AppResult};

#[derive(Deserialize)]
pub(crate) struct RoomForm {
    pub(crate) topic: String,
    pub(crate) name: String,
    pub(crate) description: String,
}

pub(crate) async fn topic_options(db_pool: &SqlitePool) -> AppResult<String> {
    let topics: Vec<(String,)> = sqlx::query_as("SELECT name FROM topics")
        .fetch_all(db_pool)
        .await?;

    let mut options = String::new();
    for (name,) in &topics {
        options += &format!("<option value=\"{}\"></option>", res::escape(name));
    }
    Ok(options)
}

#[debug_handler]
pub(crate) async fn new_room_page(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    if auth::current_user(&session, &db_pool).await?.is_none() {
        return Ok(Redirect::to("/login").into_response());
    }

    let page = include_res!(str, "/pages/room_form.html")
        .replace("{title}", "Create Room")
        .replace("{action}", "/r/new")
        .replace("{topic}", "")
        .replace("{name}", "")
        .replace("{description}", "")
        .replace("{topic_options}", &topic_options(&db_pool).await?);

    Ok(Html(page).into_response())
}

#[debug_handler]
pub(crate) async fn new_room(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(RoomForm { topic, name, description }): Form<RoomForm>,
) -> AppResult<Response> {
    let Some(user) = auth::current_user(&session, &db_pool).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let topic_id = db::get_or_create_topic(&db_pool, &topic).await?;

    let room_id = Uuid::now_v7().to_string();
    sqlx::query("INSERT INTO rooms (id,host_id,topic_id,name,description) VALUES (?,?,?,?,?)")
        .bind(&room_id)
        .bind(&user.id)
        .bind(&topic_id)
        .bind(&name)
        .bind(&description)
        .execute(&db_pool)
        .await?;

    tracing::info!(%room_id, host = %user.username, "room created");

    Ok(Redirect::to("/").into_response())
}
