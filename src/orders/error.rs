/// Error types for order storage
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

/// Error types for order operations
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Customer not found: {0}")]
    CustomerNotFound(i32),

    #[error("Order not found: {0}")]
    NotFound(i32),

    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for OrderError {
    fn from(err: sqlx::Error) -> Self {
        OrderError::Repository(RepositoryError::DatabaseError(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(OrderError::CustomerNotFound(4).to_string(), "Customer not found: 4");
        assert_eq!(OrderError::NotFound(9).to_string(), "Order not found: 9");
    }

    #[test]
    fn test_error_from_validation() {
        let err: OrderError = validator::ValidationErrors::new().into();
        assert!(matches!(err, OrderError::ValidationError(_)));
    }

    #[test]
    fn test_error_from_sqlx() {
        let err: OrderError = sqlx::Error::RowNotFound.into();
        assert!(matches!(
            err,
            OrderError::Repository(RepositoryError::DatabaseError(_))
        ));
    }
}
