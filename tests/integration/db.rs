use sqlx::SqlitePool;
use tempfile::TempDir;
use tinyblog::db::{self, posts, users};

async fn fresh_pool(dir: &TempDir) -> SqlitePool {
    let url = format!("sqlite:{}", dir.path().join("instance").join("app.sqlite").display());
    let pool = db::connect(&url).await.expect("Failed to connect");
    db::migrate(&pool).await.expect("Failed to migrate");
    pool
}

#[tokio::test]
async fn connect_creates_the_instance_directory() {
    let dir = TempDir::new().unwrap();

    let _pool = fresh_pool(&dir).await;

    assert!(dir.path().join("instance").join("app.sqlite").exists());
}

#[tokio::test]
async fn init_db_wipes_existing_data() {
    let dir = TempDir::new().unwrap();
    let pool = fresh_pool(&dir).await;
    let mut conn = pool.acquire().await.unwrap();

    users::create_user(&mut conn, "someone", "hash").await.unwrap();
    drop(conn);

    db::init_db(&pool).await.unwrap();

    let mut conn = pool.acquire().await.unwrap();
    assert!(users::find_by_username(&mut conn, "someone").await.unwrap().is_none());
}

#[tokio::test]
async fn usernames_are_unique() {
    let dir = TempDir::new().unwrap();
    let pool = fresh_pool(&dir).await;
    let mut conn = pool.acquire().await.unwrap();

    let first = users::create_user(&mut conn, "dup", "hash").await.unwrap();
    let second = users::create_user(&mut conn, "dup", "hash").await.unwrap();

    assert!(first.is_some());
    assert!(second.is_none());
}

#[tokio::test]
async fn post_queries_join_the_author() {
    let dir = TempDir::new().unwrap();
    let pool = fresh_pool(&dir).await;
    let mut conn = pool.acquire().await.unwrap();

    let author = users::create_user(&mut conn, "writer", "hash").await.unwrap().unwrap();
    let first = posts::create_post(&mut conn, author, "first", "one").await.unwrap();
    let second = posts::create_post(&mut conn, author, "second", "two").await.unwrap();

    let listed = posts::list_posts(&mut conn).await.unwrap();
    let ids: Vec<i64> = listed.iter().map(|p| p.id).collect();
    // Same (or later) timestamp; the later insert comes first
    assert_eq!(ids, vec![second, first]);
    assert!(listed.iter().all(|p| p.username == "writer"));

    posts::update_post(&mut conn, first, "first (edited)", "uno").await.unwrap();
    let edited = posts::find_post(&mut conn, first).await.unwrap().unwrap();
    assert_eq!(edited.title, "first (edited)");
    assert_eq!(edited.body, "uno");

    posts::delete_post(&mut conn, first).await.unwrap();
    assert!(posts::find_post(&mut conn, first).await.unwrap().is_none());
}
