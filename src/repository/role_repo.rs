use crate::models::{Role, RoleName};
use sqlx::PgPool;

#[derive(Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Role>, sqlx::Error> {
        sqlx::query_as::<_, Role>("SELECT id, role_name FROM roles ORDER BY role_name::text ASC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Role>, sqlx::Error> {
        sqlx::query_as::<_, Role>("SELECT id, role_name FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn find_by_name(&self, name: RoleName) -> Result<Option<Role>, sqlx::Error> {
        sqlx::query_as::<_, Role>("SELECT id, role_name FROM roles WHERE role_name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
    }

    /// Returns the role with `name`, creating it first if missing.
    pub async fn ensure(&self, name: RoleName) -> Result<Role, sqlx::Error> {
        sqlx::query("INSERT INTO roles (role_name) VALUES ($1) ON CONFLICT (role_name) DO NOTHING")
            .bind(name)
            .execute(&self.pool)
            .await?;

        self.find_by_name(name).await?.ok_or(sqlx::Error::RowNotFound)
    }
}
