const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

fn db_code(err: &sqlx::Error) -> Option<String> {
    if let sqlx::Error::Database(db_err) = err {
        return db_err.code().map(|c| c.into_owned());
    }
    None
}

/// Returns the violated constraint name when `err` is a unique violation.
pub fn check_unique_violation(err: &sqlx::Error) -> Option<String> {
    if db_code(err).as_deref() == Some(UNIQUE_VIOLATION) {
        if let sqlx::Error::Database(db_err) = err {
            return Some(db_err.constraint().unwrap_or_default().to_string());
        }
    }
    None
}

pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    db_code(err).as_deref() == Some(FOREIGN_KEY_VIOLATION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_are_not_constraint_violations() {
        let err = sqlx::Error::RowNotFound;
        assert_eq!(check_unique_violation(&err), None);
        assert!(!is_foreign_key_violation(&err));
    }
}
