mod common;

use axum::http::StatusCode;

use common::{body_text, create_room, location, register, room_id_by_name, spawn};

#[tokio::test]
async fn creating_a_room_creates_its_topic_on_demand() {
    let app = spawn().await;
    let mut client = app.client();
    register(&mut client, "ada", "ada@example.com").await;

    create_room(&mut client, "Math", "algebra-help", "all+things+algebra").await;
    create_room(&mut client, "Math", "calculus-corner", "derivatives").await;

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM topics WHERE name=?")
        .bind("Math")
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(count, 1, "topic is reused, not duplicated");
}

#[tokio::test]
async fn room_form_redirects_anonymous_visitors_to_login() {
    let app = spawn().await;
    let mut client = app.client();

    let res = client.get("/r/new").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login");

    let res = client
        .post_form("/r/new", "topic=Math&name=sneaky&description=nope")
        .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login");
}

#[tokio::test]
async fn home_search_matches_topic_name_and_description() {
    let app = spawn().await;
    let mut client = app.client();
    register(&mut client, "ada", "ada@example.com").await;
    create_room(&mut client, "Math", "algebra-help", "equations").await;
    create_room(&mut client, "Programming", "rustchat", "systems+talk").await;
    create_room(&mut client, "Gardening", "mathilda-fans", "flowers").await;

    let res = client.get("/?q=math").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(res).await;

    // Topic "Math" matches, and so does the room name "mathilda-fans".
    assert!(body.contains("algebra-help"));
    assert!(body.contains("mathilda-fans"));
    assert!(!body.contains("rustchat"));
}

#[tokio::test]
async fn home_without_query_lists_everything() {
    let app = spawn().await;
    let mut client = app.client();
    register(&mut client, "ada", "ada@example.com").await;
    create_room(&mut client, "Math", "algebra-help", "equations").await;
    create_room(&mut client, "Programming", "rustchat", "systems+talk").await;

    let body = body_text(client.get("/").await).await;
    assert!(body.contains("algebra-help"));
    assert!(body.contains("rustchat"));
    assert!(body.contains("2 rooms"));
}

#[tokio::test]
async fn non_host_cannot_update_a_room() {
    let app = spawn().await;
    let mut host = app.client();
    register(&mut host, "ada", "ada@example.com").await;
    create_room(&mut host, "Math", "algebra-help", "equations").await;
    let room_id = room_id_by_name(&app.db_pool, "algebra-help").await;

    let mut other = app.client();
    register(&mut other, "bob", "bob@example.com").await;

    let res = other.get(&format!("/r/{room_id}/edit")).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_text(res).await, "You are not allowed here");

    let res = other
        .post_form(
            &format!("/r/{room_id}/edit"),
            "topic=Hijack&name=mine-now&description=gotcha",
        )
        .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let (name,): (String,) = sqlx::query_as("SELECT name FROM rooms WHERE id=?")
        .bind(&room_id)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(name, "algebra-help", "room is unchanged");
}

#[tokio::test]
async fn host_can_update_name_topic_and_description() {
    let app = spawn().await;
    let mut host = app.client();
    register(&mut host, "ada", "ada@example.com").await;
    create_room(&mut host, "Math", "algebra-help", "equations").await;
    let room_id = room_id_by_name(&app.db_pool, "algebra-help").await;

    let res = host
        .post_form(
            &format!("/r/{room_id}/edit"),
            "topic=Logic&name=proof-club&description=formal+proofs",
        )
        .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");

    let (name, description, topic): (String, String, String) = sqlx::query_as(
        "SELECT r.name, r.description, t.name
         FROM rooms r JOIN topics t ON t.id = r.topic_id
         WHERE r.id=?",
    )
    .bind(&room_id)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(name, "proof-club");
    assert_eq!(description, "formal proofs");
    assert_eq!(topic, "Logic");
}

#[tokio::test]
async fn non_host_cannot_delete_a_room() {
    let app = spawn().await;
    let mut host = app.client();
    register(&mut host, "ada", "ada@example.com").await;
    create_room(&mut host, "Math", "algebra-help", "equations").await;
    let room_id = room_id_by_name(&app.db_pool, "algebra-help").await;

    let mut other = app.client();
    register(&mut other, "bob", "bob@example.com").await;

    let res = other.post_form(&format!("/r/{room_id}/delete"), "").await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rooms WHERE id=?")
        .bind(&room_id)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(count, 1, "room still exists");
}

#[tokio::test]
async fn deleting_a_room_takes_its_messages_with_it() {
    let app = spawn().await;
    let mut host = app.client();
    register(&mut host, "ada", "ada@example.com").await;
    create_room(&mut host, "Math", "algebra-help", "equations").await;
    let room_id = room_id_by_name(&app.db_pool, "algebra-help").await;

    host.post_form(&format!("/r/{room_id}"), "body=welcome").await;

    // GET first shows a confirmation page, nothing is deleted yet.
    let res = host.get(&format!("/r/{room_id}/delete")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains("algebra-help"));

    let res = host.post_form(&format!("/r/{room_id}/delete"), "").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let (rooms,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rooms")
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    let (messages,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages")
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(rooms, 0);
    assert_eq!(messages, 0);
}

#[tokio::test]
async fn topics_page_filters_by_name() {
    let app = spawn().await;
    let mut client = app.client();
    register(&mut client, "ada", "ada@example.com").await;
    create_room(&mut client, "Math", "algebra-help", "equations").await;
    create_room(&mut client, "Programming", "rustchat", "systems").await;

    let body = body_text(client.get("/topics?q=prog").await).await;
    assert!(body.contains("Programming"));
    assert!(!body.contains("Math"));
}

#[tokio::test]
async fn activity_page_filters_by_room_topic() {
    let app = spawn().await;
    let mut client = app.client();
    register(&mut client, "ada", "ada@example.com").await;
    create_room(&mut client, "Math", "algebra-help", "equations").await;
    create_room(&mut client, "Programming", "rustchat", "systems").await;

    let math_room = room_id_by_name(&app.db_pool, "algebra-help").await;
    let rust_room = room_id_by_name(&app.db_pool, "rustchat").await;
    client.post_form(&format!("/r/{math_room}"), "body=quadratics").await;
    client.post_form(&format!("/r/{rust_room}"), "body=borrowck").await;

    let body = body_text(client.get("/activity?q=math").await).await;
    assert!(body.contains("quadratics"));
    assert!(!body.contains("borrowck"));
}
