// tests/api_tests.rs

mod common;

use common::{client, html, location, login, register, spawn_app};
use reqwest::header::SET_COOKIE;

#[tokio::test]
async fn unknown_path_is_404() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = client()
        .get(format!("{}/random_path_that_does_not_exist", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn public_pages_render() {
    let app = spawn_app().await;
    let client = client();

    for path in [
        "/", "/articles", "/nutrition", "/climate", "/quiz", "/exercises", "/eco_tips", "/terms",
        "/register", "/login",
    ] {
        let response = client
            .get(format!("{}{}", app.address, path))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status().as_u16(), 200, "GET {}", path);
        let body = response.text().await.unwrap();
        assert!(body.contains("<html"), "GET {} should render a page", path);
    }
}

#[tokio::test]
async fn register_redirects_to_login_with_flash() {
    let app = spawn_app().await;
    let client = client();

    let response = register(&client, &app.address, "alice", "a@x.com", "pw123").await;
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/login");

    // The flash shows once on the next page, then is gone.
    let first = client
        .get(format!("{}/login", app.address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(first.contains(&html("Registration successful")));

    let second = client
        .get(format!("{}/login", app.address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!second.contains(&html("Registration successful")));
}

#[tokio::test]
async fn duplicate_registrations_are_reported_separately() {
    let app = spawn_app().await;
    let client = client();

    register(&client, &app.address, "alice", "a@x.com", "pw123").await;

    let response = register(&client, &app.address, "alice", "b@x.com", "pw123").await;
    assert_eq!(location(&response), "/register");
    let page = client
        .get(format!("{}/register", app.address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains(&html("User already exists")));

    let response = register(&client, &app.address, "bob", "a@x.com", "pw123").await;
    assert_eq!(location(&response), "/register");
    let page = client
        .get(format!("{}/register", app.address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains(&html("Email is already in use")));

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn stored_password_is_hashed() {
    let app = spawn_app().await;
    register(&client(), &app.address, "alice", "a@x.com", "pw123").await;

    let (password,): (String,) = sqlx::query_as("SELECT password FROM users WHERE username = ?")
        .bind("alice")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_ne!(password, "pw123");
}

#[tokio::test]
async fn login_sets_session_cookie_only_on_valid_password() {
    let app = spawn_app().await;
    let client = client();
    register(&client, &app.address, "alice", "a@x.com", "pw123").await;

    let bad = login(&client, &app.address, "alice", "wrong").await;
    assert_eq!(bad.status().as_u16(), 200);
    assert!(
        bad.headers()
            .get_all(SET_COOKIE)
            .iter()
            .all(|v| !v.to_str().unwrap().starts_with("session="))
    );
    assert!(bad.text().await.unwrap().contains(&html("Invalid username or password")));

    let good = login(&client, &app.address, "alice", "pw123").await;
    assert_eq!(good.status().as_u16(), 303);
    assert_eq!(location(&good), "/");
    assert!(
        good.headers()
            .get_all(SET_COOKIE)
            .iter()
            .any(|v| v.to_str().unwrap().starts_with("session="))
    );

    let home = client
        .get(format!("{}/", app.address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(home.contains("Signed in as alice"));
}

#[tokio::test]
async fn protected_pages_redirect_anonymous_users() {
    let app = spawn_app().await;
    let client = client();

    for path in ["/add_post", "/logout"] {
        let response = client
            .get(format!("{}{}", app.address, path))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 303, "GET {}", path);
        assert_eq!(location(&response), format!("/login?next={}", path));
    }

    let login_page = client
        .get(format!("{}/login?next=/add_post", app.address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(login_page.contains(&html("Please log in to access this page.")));
    assert!(login_page.contains(&format!(r#"name="next" value="{}""#, html("/add_post"))));
}

#[tokio::test]
async fn login_returns_to_next_page() {
    let app = spawn_app().await;
    let client = client();
    register(&client, &app.address, "alice", "a@x.com", "pw123").await;

    let response = client
        .post(format!("{}/login", app.address))
        .form(&[("username", "alice"), ("password", "pw123"), ("next", "/add_post")])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&response), "/add_post");

    let response = client
        .post(format!("{}/login", app.address))
        .form(&[
            ("username", "alice"),
            ("password", "pw123"),
            ("next", "//evil.example"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn add_post_validates_and_publishes() {
    let app = spawn_app().await;
    let client = client();
    register(&client, &app.address, "alice", "a@x.com", "pw123").await;
    login(&client, &app.address, "alice", "pw123").await;

    let rejected = client
        .post(format!("{}/add_post", app.address))
        .form(&[("title", ""), ("content", "x")])
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status().as_u16(), 200);
    assert!(rejected.text().await.unwrap().contains("flash error"));

    // A field missing from the form entirely.
    let rejected = client
        .post(format!("{}/add_post", app.address))
        .form(&[("title", "x")])
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status().as_u16(), 200);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);

    let created = client
        .post(format!("{}/add_post", app.address))
        .form(&[("title", "Hello"), ("content", "World")])
        .send()
        .await
        .unwrap();
    assert_eq!(created.status().as_u16(), 303);
    assert_eq!(location(&created), "/articles");

    let articles = client
        .get(format!("{}/articles", app.address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(articles.contains("<h2>Hello</h2>"));
}

#[tokio::test]
async fn logout_invalidates_replayed_cookie() {
    let app = spawn_app().await;
    let client = client();
    register(&client, &app.address, "alice", "a@x.com", "pw123").await;

    let response = login(&client, &app.address, "alice", "pw123").await;
    let session_cookie = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("session="))
        .and_then(|v| v.split(';').next())
        .expect("session cookie")
        .to_string();

    let response = client
        .get(format!("{}/logout", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/");

    // The cookie jar dropped the session.
    let response = client
        .get(format!("{}/add_post", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 303);

    // Replaying the old cookie by hand does not work either.
    let replay = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
        .get(format!("{}/add_post", app.address))
        .header(reqwest::header::COOKIE, session_cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(replay.status().as_u16(), 303);
    assert_eq!(location(&replay), "/login?next=/add_post");
}
