use crate::helpers::{location, TestApp};

#[tokio::test]
async fn index_shows_posts_to_everyone() {
    let app = TestApp::spawn().await;

    let body = app.get_text("/").await;

    assert!(body.contains("Log In"));
    assert!(body.contains("Register"));
    assert!(body.contains("test title"));
    assert!(body.contains("by test on 2018-01-01"));
    assert!(body.contains("<p>test\nbody</p>"));
    // Anonymous visitors get no edit links
    assert!(!body.contains("href=\"/1/update\""));
}

#[tokio::test]
async fn index_shows_edit_link_to_the_author() {
    let app = TestApp::spawn().await;
    app.login_as_test().await;

    let body = app.get_text("/").await;

    assert!(body.contains("Log Out"));
    assert!(body.contains("href=\"/1/update\""));
}

#[tokio::test]
async fn index_lists_newest_first() {
    let app = TestApp::spawn().await;
    app.login_as_test().await;
    app.post_form("/create", &[("title", "fresh post"), ("body", "")])
        .await;

    let body = app.get_text("/").await;

    let fresh = body.find("fresh post").expect("new post missing");
    let old = body.find("test title").expect("seed post missing");
    assert!(fresh < old);
}

#[tokio::test]
async fn guarded_views_redirect_to_login() {
    let app = TestApp::spawn().await;

    for path in ["/create", "/1/update", "/1/delete"] {
        let response = app.post_form(path, &[("title", "x"), ("body", "x")]).await;

        assert_eq!(response.status().as_u16(), 303, "{}", path);
        assert_eq!(location(&response), "/auth/login", "{}", path);
    }

    let response = app.get("/create").await;
    assert_eq!(location(&response), "/auth/login");

    assert_eq!(app.post_count().await, 1);
}

#[tokio::test]
async fn only_the_author_may_change_a_post() {
    let app = TestApp::spawn().await;

    // Hand the post to the other user
    sqlx::query("UPDATE post SET author_id = 2 WHERE id = 1")
        .execute(&app.pool)
        .await
        .unwrap();

    app.login_as_test().await;

    // Current user can't modify other user's post
    let update = app.post_form("/1/update", &[("title", "mine"), ("body", "")]).await;
    assert_eq!(update.status().as_u16(), 403);

    let delete = app.post_form("/1/delete", &[]).await;
    assert_eq!(delete.status().as_u16(), 403);

    let edit_form = app.get("/1/update").await;
    assert_eq!(edit_form.status().as_u16(), 403);
    assert!(edit_form.text().await.unwrap().contains("Something Went Wrong"));

    // Current user doesn't see edit link
    assert!(!app.get_text("/").await.contains("href=\"/1/update\""));
    assert_eq!(app.post_count().await, 1);
}

#[tokio::test]
async fn missing_posts_are_404() {
    let app = TestApp::spawn().await;
    app.login_as_test().await;

    for path in ["/2/update", "/2/delete"] {
        let response = app.post_form(path, &[("title", "x"), ("body", "")]).await;

        assert_eq!(response.status().as_u16(), 404, "{}", path);
        assert!(response.text().await.unwrap().contains("Post id 2"));
    }

    let not_a_number = app.get("/abc/update").await;
    assert_eq!(not_a_number.status().as_u16(), 404);
}

#[tokio::test]
async fn create_inserts_a_post() {
    let app = TestApp::spawn().await;
    app.login_as_test().await;
    assert_eq!(app.get("/create").await.status().as_u16(), 200);

    let response = app
        .post_form("/create", &[("title", "created"), ("body", "")])
        .await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/");
    assert_eq!(app.post_count().await, 2);

    let author: i64 = sqlx::query_scalar("SELECT author_id FROM post WHERE title = 'created'")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(author, 1);
}

#[tokio::test]
async fn update_changes_the_post() {
    let app = TestApp::spawn().await;
    app.login_as_test().await;

    let form = app.get_text("/1/update").await;
    assert!(form.contains("value=\"test title\""));

    let response = app
        .post_form("/1/update", &[("title", "updated"), ("body", "")])
        .await;
    assert_eq!(response.status().as_u16(), 303);

    let title: String = sqlx::query_scalar("SELECT title FROM post WHERE id = 1")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(title, "updated");
}

#[tokio::test]
async fn create_and_update_require_a_title() {
    let app = TestApp::spawn().await;
    app.login_as_test().await;

    for path in ["/create", "/1/update"] {
        let response = app.post_form(path, &[("title", ""), ("body", "kept body")]).await;

        assert_eq!(response.status().as_u16(), 200, "{}", path);
        let body = response.text().await.unwrap();
        assert!(body.contains("Title is required."), "{}", path);
        // The submitted body is echoed back into the form
        assert!(body.contains("kept body"), "{}", path);
    }

    assert_eq!(app.post_count().await, 1);
}

#[tokio::test]
async fn delete_removes_the_post() {
    let app = TestApp::spawn().await;
    app.login_as_test().await;

    let response = app.post_form("/1/delete", &[]).await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/");
    assert_eq!(app.post_count().await, 0);
}

#[tokio::test]
async fn post_bodies_render_as_markdown_without_raw_html() {
    let app = TestApp::spawn().await;
    app.login_as_test().await;

    app.post_form(
        "/create",
        &[
            ("title", "formatted"),
            ("body", "**loud**\n\n<script>alert(1)</script>\n"),
        ],
    )
    .await;

    let body = app.get_text("/").await;
    assert!(body.contains("<strong>loud</strong>"));
    assert!(body.contains("&lt;script&gt;"));
    assert!(!body.contains("<script>alert(1)</script>"));
}
