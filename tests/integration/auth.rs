use crate::helpers::{location, session_cookie, TestApp};

#[tokio::test]
async fn register_page_renders() {
    let app = TestApp::spawn().await;

    let response = app.get("/auth/register").await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(response.text().await.unwrap().contains("Register"));
}

#[tokio::test]
async fn register_creates_user_and_redirects_to_login() {
    let app = TestApp::spawn().await;

    let response = app
        .post_form("/auth/register", &[("username", "a"), ("password", "a")])
        .await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/auth/login");

    let stored: String = sqlx::query_scalar("SELECT password FROM user WHERE username = 'a'")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_ne!(stored, "a");
    assert!(bcrypt::verify("a", &stored).unwrap());
}

#[tokio::test]
async fn register_validates_input() {
    let app = TestApp::spawn().await;

    let cases = [
        ("", "", "Username is required."),
        ("a", "", "Password is required."),
        ("test", "test", "User test is already registered."),
    ];

    for (username, password, message) in cases {
        let response = app
            .post_form("/auth/register", &[("username", username), ("password", password)])
            .await;

        assert_eq!(response.status().as_u16(), 200);
        let body = response.text().await.unwrap();
        assert!(body.contains(message), "expected {:?} in the page", message);
    }
}

#[tokio::test]
async fn register_treats_missing_fields_as_empty() {
    let app = TestApp::spawn().await;

    let response = app.post_form("/auth/register", &[]).await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(response.text().await.unwrap().contains("Username is required."));
}

#[tokio::test]
async fn login_starts_a_session() {
    let app = TestApp::spawn().await;
    assert_eq!(app.get("/auth/login").await.status().as_u16(), 200);

    let response = app.login("test", "test").await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/");

    let index = app.get_text("/").await;
    assert!(index.contains("<span>test</span>"));
    assert!(index.contains("Log Out"));
}

#[tokio::test]
async fn login_validates_input() {
    let app = TestApp::spawn().await;

    let cases = [
        ("a", "test", "Incorrect username."),
        ("test", "a", "Incorrect password."),
    ];

    for (username, password, message) in cases {
        let response = app.login(username, password).await;

        assert_eq!(response.status().as_u16(), 200);
        let body = response.text().await.unwrap();
        assert!(body.contains(message), "expected {:?} in the page", message);
    }

    // Still logged out
    assert!(app.get_text("/").await.contains("Log In"));
}

#[tokio::test]
async fn flashed_messages_are_shown_once() {
    let app = TestApp::spawn().await;

    let body = app.login("nobody", "x").await.text().await.unwrap();
    assert!(body.contains("Incorrect username."));

    let next = app.get_text("/auth/login").await;
    assert!(!next.contains("Incorrect username."));
}

#[tokio::test]
async fn logout_clears_the_session() {
    let app = TestApp::spawn().await;
    app.login_as_test().await;

    let response = app.logout().await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/");

    let index = app.get_text("/").await;
    assert!(index.contains("Log In"));
    assert!(!index.contains("Log Out"));
}

#[tokio::test]
async fn session_for_a_deleted_user_is_logged_out() {
    let app = TestApp::spawn().await;
    app.login("other", "other").await;

    sqlx::query("DELETE FROM user WHERE username = 'other'")
        .execute(&app.pool)
        .await
        .unwrap();

    let index = app.get_text("/").await;
    assert!(index.contains("Log In"));

    let create = app.get("/create").await;
    assert_eq!(create.status().as_u16(), 303);
    assert_eq!(location(&create), "/auth/login");
}

#[tokio::test]
async fn session_cookie_is_http_only() {
    let app = TestApp::spawn().await;

    let response = app.login("test", "test").await;

    let cookie = response
        .headers()
        .get("set-cookie")
        .expect("login did not set a cookie")
        .to_str()
        .unwrap();
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn login_issues_a_new_session_id() {
    let app = TestApp::spawn().await;

    // A failed login flashes a message, which starts an anonymous session
    let failed = app.login("test", "wrong").await;
    let before = session_cookie(&failed).expect("failed login did not start a session");

    let response = app.login("test", "test").await;
    assert_eq!(response.status().as_u16(), 303);
    let after = session_cookie(&response).expect("login did not set a cookie");

    assert_ne!(before, after);
}
