pub const API_NAME: &str = "[car-rental-api]";

pub const DEFAULT_ADMIN_FIRST_NAME: &str = "Admin";
pub const DEFAULT_ADMIN_LAST_NAME: &str = "User";
pub const DEFAULT_ADMIN_DATE_OF_BIRTH: &str = "1990-01-01";

/// (license plate, brand, model, year) for the cars seeded into an empty fleet.
pub const SAMPLE_CARS: [(&str, &str, &str, i32); 4] = [
    ("ABC-123", "Toyota", "Camry", 2022),
    ("DEF-456", "Honda", "CR-V", 2023),
    ("GHI-789", "BMW", "X3", 2022),
    ("JKL-012", "Mercedes", "C-Class", 2023),
];
