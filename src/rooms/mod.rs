mod delete;
mod edit;
mod home;
mod new;
mod room;

pub use delete::{delete_message, delete_message_page};
pub(crate) use home::home;

use axum::{routing::get, Router};

use crate::{include_res, res, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/new", get(new::new_room_page).post(new::new_room))
        .route("/{id}", get(room::room).post(room::post_message))
        .route("/{id}/edit", get(edit::edit_room_page).post(edit::edit_room))
        .route("/{id}/delete", get(delete::delete_room_page).post(delete::delete_room))
}

pub(crate) fn room_item(id: &str, name: &str, topic: &str, host_id: &str, host: &str, description: &str) -> String {
    include_res!(str, "/pages/room_item.html")
        .replace("{id}", id)
        .replace("{name}", &res::escape(name))
        .replace("{topic}", &res::escape(topic))
        .replace("{host_id}", host_id)
        .replace("{host}", &res::escape(host))
        .replace("{description}", &res::escape(description))
}

pub(crate) fn message_item(id: &str, user_id: &str, username: &str, created: &str, body: &str) -> String {
    let mut body_html = String::new();
    pulldown_cmark::html::push_html(&mut body_html, pulldown_cmark::Parser::new(body));

    include_res!(str, "/pages/message_item.html")
        .replace("{id}", id)
        .replace("{user_id}", user_id)
        .replace("{username}", &res::escape(username))
        .replace("{created}", created)
        .replace("{body}", &body_html)
}

pub(crate) fn topic_item(name: &str, room_count: i64) -> String {
    include_res!(str, "/pages/topic_item.html")
        .replace("{name}", &res::escape(name))
        .replace("{count}", &room_count.to_string())
}
