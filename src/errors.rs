use async_graphql::ErrorExtensions;
use diesel::result::DatabaseErrorKind;
use thiserror::Error;

/// Error kinds surfaced by the service layer.
///
/// Every mutation returns `Result<_, ServiceError>`; validation failures are
/// plain values, never panics. `bulkCreateCustomers` is the one operation
/// that downgrades these to strings in its payload instead of aborting.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Machine-readable code carried in the GraphQL error extensions.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "VALIDATION",
            ServiceError::Conflict(_) => "CONFLICT",
            ServiceError::NotFound(_) => "NOT_FOUND",
            ServiceError::Internal(_) => "INTERNAL",
        }
    }
}

impl From<diesel::result::Error> for ServiceError {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            // The unique index on customers.email also arbitrates the
            // check-then-act race between concurrent creates.
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                ServiceError::Conflict(info.message().to_string())
            }
            diesel::result::Error::NotFound => ServiceError::NotFound("record not found".into()),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for ServiceError {
    fn from(e: r2d2::Error) -> Self {
        ServiceError::Internal(e.to_string())
    }
}

impl ErrorExtensions for ServiceError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        async_graphql::Error::new(self.to_string()).extend_with(|_, ext| ext.set("code", code))
    }
}
