use crate::db::models::Post;
use crate::error::AppResult;
use sqlx::SqliteConnection;

const SELECT_POST: &str = "SELECT p.id, p.title, p.body, p.created, p.author_id, u.username
     FROM post p JOIN user u ON p.author_id = u.id";

/// All posts, newest first.
pub async fn list_posts(conn: &mut SqliteConnection) -> AppResult<Vec<Post>> {
    let posts = sqlx::query_as::<_, Post>(&format!("{} ORDER BY p.created DESC, p.id DESC", SELECT_POST))
        .fetch_all(&mut *conn)
        .await?;

    Ok(posts)
}

pub async fn find_post(conn: &mut SqliteConnection, post_id: i64) -> AppResult<Option<Post>> {
    let post = sqlx::query_as::<_, Post>(&format!("{} WHERE p.id = ?", SELECT_POST))
        .bind(post_id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(post)
}

pub async fn create_post(conn: &mut SqliteConnection, author_id: i64, title: &str, body: &str) -> AppResult<i64> {
    let result = sqlx::query("INSERT INTO post (title, body, author_id) VALUES (?, ?, ?)")
        .bind(title)
        .bind(body)
        .bind(author_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update_post(conn: &mut SqliteConnection, post_id: i64, title: &str, body: &str) -> AppResult<()> {
    sqlx::query("UPDATE post SET title = ?, body = ? WHERE id = ?")
        .bind(title)
        .bind(body)
        .bind(post_id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

pub async fn delete_post(conn: &mut SqliteConnection, post_id: i64) -> AppResult<()> {
    sqlx::query("DELETE FROM post WHERE id = ?")
        .bind(post_id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}
