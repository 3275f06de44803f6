pub mod extractor;
pub mod jwt;
pub mod password;

pub use extractor::{AdminUser, AuthUser};
pub use jwt::{Claims, TokenError, TokenService};
pub use password::{hash_password, verify_password};
