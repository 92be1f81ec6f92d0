//! Shared fixtures for the HTTP tests.

#![allow(dead_code, unused_macros)]

use std::collections::HashMap;
use std::path::PathBuf;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::test::TestRequest;
use migration::{Migrator, MigratorTrait};
use uuid::Uuid;

use quill_core::domain::{NewUser, User};
use quill_core::ports::{PasswordService, UserRepository};
use quill_infra::database;
use quill_server::config::AppConfig;
use quill_server::middleware::auth::SESSION_COOKIE;
use quill_server::state::AppState;

pub const BOUNDARY: &str = "quill-test-boundary";

/// Build the app service over `$state` with all routes.
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state.clone()))
                .configure(quill_server::handlers::configure_routes),
        )
        .await
    };
}

/// A scratch directory unique to one test.
pub fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("quill-server-{}", Uuid::new_v4()))
}

/// State over a fresh in-memory database, with `overrides` applied on top
/// of the test defaults.
pub async fn test_state_with(overrides: &[(&str, &str)]) -> AppState {
    let mut vars: HashMap<String, String> = [
        ("DATABASE_URL", "sqlite::memory:".to_string()),
        ("SESSION_SECRET", "test-secret".to_string()),
        ("STATIC_DIR", scratch_dir().display().to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }

    let config = AppConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();
    let db = database::connect(&config.database).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    AppState::new(&config, db).await.unwrap()
}

pub async fn test_state() -> AppState {
    test_state_with(&[]).await
}

/// Store a user directly.
pub async fn create_user(state: &AppState, username: &str, password: &str) -> User {
    let hash = state.passwords.hash(password).unwrap();
    state
        .users
        .insert(NewUser::new(username.to_string(), hash))
        .await
        .unwrap()
}

/// A session cookie for a freshly stored admin.
pub async fn login_cookie(state: &AppState) -> Cookie<'static> {
    let user = create_user(state, "admin", "secret").await;
    let token = state.sessions.start(&user).await.unwrap();
    Cookie::new(SESSION_COOKIE, token)
}

/// A `multipart/form-data` body with `title`, `body` and, if given, an
/// `img` file part.
pub fn multipart_body(title: &str, body: &str, img: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut out = Vec::new();
    for (name, value) in [("title", title), ("body", body)] {
        out.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, bytes)) = img {
        out.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"img\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        out.extend_from_slice(bytes);
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    out
}

/// POST /create with a multipart body.
pub fn create_request(
    cookie: &Cookie<'static>,
    title: &str,
    body: &str,
    img: Option<(&str, &[u8])>,
) -> TestRequest {
    TestRequest::post()
        .uri("/create")
        .cookie(cookie.clone())
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart_body(title, body, img))
}

/// The `Location` header of a redirect.
pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// The value of the cookie `name` set by a response, if any.
pub fn set_cookie<B>(resp: &ServiceResponse<B>, name: &str) -> Option<String> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
}
