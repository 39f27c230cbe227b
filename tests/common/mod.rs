#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tower::ServiceExt;

use parley::{app, db, AppState};

pub struct TestApp {
    pub router: Router,
    pub db_pool: SqlitePool,
}

/// Fresh app over an in-memory database. One connection so every request
/// sees the same sqlite instance.
pub async fn spawn() -> TestApp {
    let db_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::bootstrap(&db_pool).await.unwrap();

    let router = app(AppState {
        db_pool: db_pool.clone(),
    });
    TestApp { router, db_pool }
}

impl TestApp {
    /// A browser-like client with its own session cookie.
    pub fn client(&self) -> Client {
        Client {
            router: self.router.clone(),
            cookie: None,
        }
    }
}

pub struct Client {
    router: Router,
    cookie: Option<String>,
}

impl Client {
    pub async fn get(&mut self, path: &str) -> Response {
        let mut builder = Request::get(path);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&mut self, path: &str, form: &str) -> Response {
        let mut builder = Request::post(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(form.to_owned())).unwrap())
            .await
    }

    async fn send(&mut self, req: Request<Body>) -> Response {
        let res = self.router.clone().oneshot(req).await.unwrap();
        if let Some(set_cookie) = res.headers().get(header::SET_COOKIE) {
            let pair = set_cookie
                .to_str()
                .unwrap()
                .split(';')
                .next()
                .unwrap()
                .to_owned();
            self.cookie = Some(pair);
        }
        res
    }
}

pub async fn body_text(res: Response) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(res: &Response) -> &str {
    res.headers()
        .get(header::LOCATION)
        .expect("response has no location header")
        .to_str()
        .unwrap()
}

/// Registers (and therefore signs in) a user on this client.
pub async fn register(client: &mut Client, username: &str, email: &str) {
    let res = client
        .post_form(
            "/register",
            &format!("username={username}&email={email}&password1=sup3rsecret&password2=sup3rsecret"),
        )
        .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
}

pub async fn create_room(client: &mut Client, topic: &str, name: &str, description: &str) {
    let res = client
        .post_form(
            "/r/new",
            &format!("topic={topic}&name={name}&description={description}"),
        )
        .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
}

pub async fn room_id_by_name(pool: &SqlitePool, name: &str) -> String {
    let (id,): (String,) = sqlx::query_as("SELECT id FROM rooms WHERE name=?")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap();
    id
}

pub async fn message_id_by_body(pool: &SqlitePool, body: &str) -> String {
    let (id,): (String,) = sqlx::query_as("SELECT id FROM messages WHERE body=?")
        .bind(body)
        .fetch_one(pool)
        .await
        .unwrap();
    id
}
