use crate::helpers::TestApp;

#[tokio::test]
async fn health_check_says_ok() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn health_check_does_not_start_a_session() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").await;

    assert!(response.headers().get("set-cookie").is_none());
}

#[tokio::test]
async fn static_files_are_served() {
    let app = TestApp::spawn().await;

    let css = app.get("/static/css/style.css").await;
    assert_eq!(css.status().as_u16(), 200);

    let js = app.get("/static/js/main.js").await;
    assert_eq!(js.status().as_u16(), 200);
}

#[tokio::test]
async fn missing_static_file_renders_the_404_page() {
    let app = TestApp::spawn().await;

    let response = app.get("/static/css/nope.css").await;

    assert_eq!(response.status().as_u16(), 404);
    assert!(response.text().await.unwrap().contains("Page Not Found"));
}

#[tokio::test]
async fn unknown_route_renders_the_404_page() {
    let app = TestApp::spawn().await;

    let response = app.get("/no/such/page").await;

    assert_eq!(response.status().as_u16(), 404);
    let body = response.text().await.unwrap();
    assert!(body.contains("Page Not Found"));
    // Rendered inside the normal layout
    assert!(body.contains("Log In"));
}

#[tokio::test]
async fn pages_link_static_assets_through_url_for() {
    let app = TestApp::spawn().await;

    let body = app.get_text("/").await;

    assert!(body.contains("href=\"/static/css/style.css\""));
    assert!(body.contains("src=\"/static/js/main.js\""));
}

#[tokio::test]
async fn framework_rejections_render_the_error_page() {
    let app = TestApp::spawn().await;
    app.login_as_test().await;

    let response = app
        .client
        .post(format!("{}/create", app.address))
        .header("content-type", "application/json")
        .body(r#"{"title": "json", "body": ""}"#)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 415);
    let body = response.text().await.unwrap();
    assert!(body.contains("Something Went Wrong"));
    assert!(body.contains("Error 415"));
    assert!(!body.contains("Form requests must have"));
    assert_eq!(app.post_count().await, 1);
}

#[tokio::test]
async fn wrong_method_renders_the_error_page() {
    let app = TestApp::spawn().await;
    app.login_as_test().await;

    let response = app.get("/1/delete").await;

    assert_eq!(response.status().as_u16(), 405);
    assert!(response.headers().get("allow").is_some());
    assert!(response.text().await.unwrap().contains("Something Went Wrong"));
}
