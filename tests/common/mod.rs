// tests/common/mod.rs

#![allow(dead_code)]

use std::str::FromStr;

use site_health::{config::Config, routes, state::AppState};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        secret_key: "test_secret_for_integration_tests".to_string(),
        session_ttl: 600, // 10 minutes for tests
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        static_dir: "static".to_string(),
        rust_log: "error".to_string(),
    }
}

/// In-memory database on a single long-lived connection, so every query
/// sees the same data.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory SQLite");

    site_health::state::migrate(&pool)
        .await
        .expect("Failed to migrate database");
    pool
}

/// Spawns the app on a random port.
pub async fn spawn_app() -> TestApp {
    let pool = test_pool().await;
    let state = AppState {
        pool: pool.clone(),
        config: test_config(),
    };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp { address, pool }
}

/// Browser-like client: keeps cookies, does not follow redirects so tests
/// can assert on them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

pub fn location(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

pub async fn register(
    client: &reqwest::Client,
    address: &str,
    username: &str,
    email: &str,
    password: &str,
) -> reqwest::Response {
    client
        .post(format!("{}/register", address))
        .form(&[("username", username), ("email", email), ("password", password)])
        .send()
        .await
        .expect("Register request failed")
}

pub async fn login(
    client: &reqwest::Client,
    address: &str,
    username: &str,
    password: &str,
) -> reqwest::Response {
    client
        .post(format!("{}/login", address))
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .expect("Login request failed")
}

/// User-visible text as it appears in rendered HTML.
pub fn html(text: &str) -> String {
    site_health::utils::html::escape(text)
}
