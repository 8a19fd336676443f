use secrecy::{ExposeSecret, SecretString};
use sqlx::{PgConnection, PgPool};

use crate::models::user::UserSummary;

/// Passwords never leave the database unhashed: `crypt()` and `gen_salt('bf')`
/// come from the pgcrypto extension.
#[derive(Debug)]
pub struct UserQueries {
    pool: PgPool,
}

impl UserQueries {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_username(&self, user_id: i64) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn search(&self, name: &str, limit: i64, offset: i64) -> Result<Vec<UserSummary>, sqlx::Error> {
        sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT user_id, username
            FROM users
            WHERE username ILIKE $1
            ORDER BY user_id
            LIMIT $2
            OFFSET $3
            "#,
        )
        .bind(format!("%{}%", name))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn find_id_by_username(
        conn: &mut PgConnection,
        username: &str,
    ) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, i32>("SELECT user_id FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(conn)
            .await
    }

    /// The user's id when `password` matches the stored hash
    pub async fn verify_password(
        conn: &mut PgConnection,
        username: &str,
        password: &SecretString,
    ) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            r#"
            SELECT user_id
            FROM users
            WHERE username = $1
                AND password = crypt($2, password)
            "#,
        )
        .bind(username)
        .bind(password.expose_secret())
        .fetch_optional(conn)
        .await
    }

    pub async fn insert(
        conn: &mut PgConnection,
        username: &str,
        password: &SecretString,
    ) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO users (username, password)
            VALUES ($1, crypt($2, gen_salt('bf')))
            RETURNING user_id
            "#,
        )
        .bind(username)
        .bind(password.expose_secret())
        .fetch_one(conn)
        .await
    }

    /// Removes the user; their predictions go with them (ON DELETE CASCADE).
    pub async fn delete(conn: &mut PgConnection, user_id: i32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn update_username(
        conn: &mut PgConnection,
        user_id: i32,
        new_username: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET username = $1 WHERE user_id = $2")
            .bind(new_username)
            .bind(user_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn update_password(
        conn: &mut PgConnection,
        user_id: i32,
        new_password: &SecretString,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET password = crypt($1, gen_salt('bf')) WHERE user_id = $2")
            .bind(new_password.expose_secret())
            .bind(user_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}
