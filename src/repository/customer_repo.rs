use crate::models::{Customer, CustomerChanges, NewCustomer};
use sqlx::PgPool;

const CUSTOMER_SELECT: &str = "SELECT c.id, c.first_name, c.last_name, c.username, c.password, \
     c.date_of_birth, c.enabled, c.role_id, r.role_name, c.created_at, c.updated_at \
     FROM customers c JOIN roles r ON r.id = c.role_id";

#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Customer>, sqlx::Error> {
        let query = format!("{} ORDER BY c.first_name ASC, c.last_name ASC", CUSTOMER_SELECT);
        sqlx::query_as::<_, Customer>(&query)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("{} WHERE c.id = $1", CUSTOMER_SELECT);
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("{} WHERE c.username = $1", CUSTOMER_SELECT);
        sqlx::query_as::<_, Customer>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn exists_by_username(&self, username: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM customers WHERE username = $1)")
            .bind(username)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn create(&self, customer: &NewCustomer) -> Result<Customer, sqlx::Error> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO customers (first_name, last_name, username, password, date_of_birth, enabled, role_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.username)
        .bind(&customer.password_hash)
        .bind(customer.date_of_birth)
        .bind(customer.enabled)
        .bind(customer.role_id)
        .fetch_one(&self.pool)
        .await?;

        self.find_by_id(id).await?.ok_or(sqlx::Error::RowNotFound)
    }

    /// Applies `changes`; returns `None` when no customer has this id.
    pub async fn update(
        &self,
        id: i32,
        changes: &CustomerChanges,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE customers SET \
                 first_name = COALESCE($1, first_name), \
                 last_name = COALESCE($2, last_name), \
                 username = COALESCE($3, username), \
                 password = COALESCE($4, password), \
                 date_of_birth = COALESCE($5, date_of_birth), \
                 enabled = COALESCE($6, enabled), \
                 role_id = COALESCE($7, role_id), \
                 updated_at = NOW() \
             WHERE id = $8",
        )
        .bind(changes.first_name.as_deref())
        .bind(changes.last_name.as_deref())
        .bind(changes.username.as_deref())
        .bind(changes.password_hash.as_deref())
        .bind(changes.date_of_birth)
        .bind(changes.enabled)
        .bind(changes.role_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    pub async fn delete(&self, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
