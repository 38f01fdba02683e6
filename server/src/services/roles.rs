//! Role grants.
//!
//! Grants live in `user_roles` as plain (user, role) pairs. The admin role is
//! granted automatically the first time an allow-listed address completes a
//! login; everything else is denied by default.

use sqlx::PgPool;
use uuid::Uuid;

/// Check whether a user holds a role.
pub async fn has_role(pool: &PgPool, user_id: Uuid, role: &str) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT 1 FROM user_roles WHERE user_id = $1 AND role = $2")
        .bind(user_id)
        .bind(role)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

/// Grant a role. Idempotent.
pub async fn grant_role(pool: &PgPool, user_id: Uuid, role: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"INSERT INTO user_roles (user_id, role)
          VALUES ($1, $2)
          ON CONFLICT (user_id, role) DO NOTHING",
    )
    .bind(user_id)
    .bind(role)
    .execute(pool)
    .await?;
    Ok(())
}
