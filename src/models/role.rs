use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "role_name", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum RoleName {
    Admin,
    Customer,
}

impl RoleName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Admin => "ADMIN",
            RoleName::Customer => "CUSTOMER",
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: i32,
    pub role_name: RoleName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_with_uppercase_name() {
        let role = Role {
            id: 1,
            role_name: RoleName::Admin,
        };
        assert_eq!(
            serde_json::to_value(&role).unwrap(),
            serde_json::json!({"id": 1, "roleName": "ADMIN"})
        );
    }
}
