use crate::db::models::User;
use crate::error::AppResult;
use sqlx::SqliteConnection;

/// Insert a new user.
///
/// Returns `None` when the username is already taken (UNIQUE constraint).
pub async fn create_user(
    conn: &mut SqliteConnection,
    username: &str,
    password_hash: &str,
) -> AppResult<Option<i64>> {
    let result = sqlx::query("INSERT INTO user (username, password) VALUES (?, ?)")
        .bind(username)
        .bind(password_hash)
        .execute(&mut *conn)
        .await;

    match result {
        Ok(done) => Ok(Some(done.last_insert_rowid())),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub async fn find_by_username(conn: &mut SqliteConnection, username: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM user WHERE username = ?")
        .bind(username)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(user)
}

pub async fn find_by_id(conn: &mut SqliteConnection, user_id: i64) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM user WHERE id = ?")
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(user)
}
