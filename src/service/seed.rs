use anyhow::Context;
use chrono::NaiveDate;

use crate::config::Config;
use crate::constants::{
    API_NAME, DEFAULT_ADMIN_DATE_OF_BIRTH, DEFAULT_ADMIN_FIRST_NAME, DEFAULT_ADMIN_LAST_NAME,
    SAMPLE_CARS,
};
use crate::models::{CarCategory, RoleName};
use crate::repository::NewCar;
use crate::service::AccountInput;
use crate::state::AppState;

/// Ensures both roles exist, creates the admin account if it is missing and
/// fills an empty fleet with sample cars. Safe to run on every start.
pub async fn seed_defaults(state: &AppState, config: &Config) -> anyhow::Result<()> {
    state
        .roles
        .ensure(RoleName::Customer)
        .await
        .context("Failed to ensure CUSTOMER role")?;
    let admin_role = state
        .roles
        .ensure(RoleName::Admin)
        .await
        .context("Failed to ensure ADMIN role")?;

    if state
        .customers
        .find_by_username(&config.admin_username)
        .await
        .context("Failed to look up admin user")?
        .is_none()
    {
        let date_of_birth = NaiveDate::parse_from_str(DEFAULT_ADMIN_DATE_OF_BIRTH, "%Y-%m-%d")
            .context("Invalid default admin date of birth")?;
        state
            .auth
            .create_account(AccountInput {
                username: config.admin_username.clone(),
                password: config.admin_password.clone(),
                first_name: DEFAULT_ADMIN_FIRST_NAME.to_string(),
                last_name: DEFAULT_ADMIN_LAST_NAME.to_string(),
                date_of_birth,
                role_id: admin_role.id,
            })
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create default admin user: {}", e))?;
        tracing::info!("{} Default admin user '{}' created", API_NAME, config.admin_username);
    }

    if state.cars.count().await.context("Failed to count cars")? == 0 {
        for (license_plate, brand, model, year) in SAMPLE_CARS {
            state
                .cars
                .create(&NewCar {
                    license_plate: license_plate.to_string(),
                    brand: brand.to_string(),
                    model: model.to_string(),
                    year,
                    category: CarCategory::Automobile,
                })
                .await
                .with_context(|| format!("Failed to create sample car {}", license_plate))?;
        }
        tracing::info!("{} Sample cars created", API_NAME);
    }

    tracing::info!("{} Database initialization completed", API_NAME);
    Ok(())
}
