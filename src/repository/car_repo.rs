use crate::models::{Car, CarCategory};
use sqlx::PgPool;

const CAR_COLUMNS: &str = "id, license_plate, brand, model, year, category, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct NewCar {
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub category: CarCategory,
}

#[derive(Debug, Clone, Default)]
pub struct CarChanges {
    pub license_plate: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub category: Option<CarCategory>,
}

#[derive(Clone)]
pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Car>, sqlx::Error> {
        let query = format!("SELECT {} FROM cars ORDER BY brand ASC, model ASC", CAR_COLUMNS);
        sqlx::query_as::<_, Car>(&query)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Car>, sqlx::Error> {
        let query = format!("SELECT {} FROM cars WHERE id = $1", CAR_COLUMNS);
        sqlx::query_as::<_, Car>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn exists_by_license_plate(&self, license_plate: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM cars WHERE license_plate = $1)")
            .bind(license_plate)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cars")
            .fetch_one(&self.pool)
            .await
    }

    pub async fn create(&self, car: &NewCar) -> Result<Car, sqlx::Error> {
        let query = format!(
            "INSERT INTO cars (license_plate, brand, model, year, category) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            CAR_COLUMNS
        );
        sqlx::query_as::<_, Car>(&query)
            .bind(&car.license_plate)
            .bind(&car.brand)
            .bind(&car.model)
            .bind(car.year)
            .bind(car.category)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn update(&self, id: i32, changes: &CarChanges) -> Result<Option<Car>, sqlx::Error> {
        let query = format!(
            "UPDATE cars SET \
                 license_plate = COALESCE($1, license_plate), \
                 brand = COALESCE($2, brand), \
                 model = COALESCE($3, model), \
                 year = COALESCE($4, year), \
                 category = COALESCE($5, category), \
                 updated_at = NOW() \
             WHERE id = $6 RETURNING {}",
            CAR_COLUMNS
        );
        sqlx::query_as::<_, Car>(&query)
            .bind(changes.license_plate.as_deref())
            .bind(changes.brand.as_deref())
            .bind(changes.model.as_deref())
            .bind(changes.year)
            .bind(changes.category)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn delete(&self, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
