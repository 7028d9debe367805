use sea_orm::DbErr;
use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    /// Zero rows where exactly one was required.
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    /// Store failures, constraint violations included, exactly as the store reported them.
    #[error(transparent)]
    Db(#[from] DbErr),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: i64) -> Self { Self::NotFound { entity, id } }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::NotFound { .. } => 1003,
            ServiceError::Db(_) => 1200,
        }
    }

    pub fn is_not_found(&self) -> bool { matches!(self, ServiceError::NotFound { .. }) }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => ServiceError::Validation(msg),
            ModelError::Db(db) => ServiceError::Db(db),
        }
    }
}

/// Turns an empty single-row lookup into `ServiceError::NotFound`.
pub trait OptionExt<T> {
    fn or_not_found(self, entity: &'static str, id: i64) -> Result<T, ServiceError>;
}

impl<T> OptionExt<T> for Option<T> {
    fn or_not_found(self, entity: &'static str, id: i64) -> Result<T, ServiceError> {
        self.ok_or_else(|| ServiceError::not_found(entity, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_entity_and_id() {
        let err = None::<()>.or_not_found("Course", 42).unwrap_err();
        assert_eq!(err.to_string(), "Course with ID 42 not found");
        assert!(err.is_not_found());
        assert_eq!(err.code(), 1003);
    }

    #[test]
    fn present_value_passes_through() {
        assert_eq!(Some(7).or_not_found("Teacher", 1).unwrap(), 7);
    }

    #[test]
    fn store_errors_are_not_reinterpreted() {
        let err: ServiceError = ModelError::Db(DbErr::Custom("connection reset".into())).into();
        match err {
            ServiceError::Db(DbErr::Custom(msg)) => assert_eq!(msg, "connection reset"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn model_validation_maps_to_validation() {
        let err: ServiceError = ModelError::Validation("name required".into()).into();
        assert!(matches!(err, ServiceError::Validation(m) if m == "name required"));
    }
}
