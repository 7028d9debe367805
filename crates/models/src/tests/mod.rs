/// CRUD operations tests for all models
pub mod crud_tests;


use crate::db::connect;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// Connect and migrate, or `None` when no database is reachable.
pub(crate) async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return None;
    }
    let db = match connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

mod validation_tests {
    use crate::errors::ModelError;
    use crate::{course, student, teacher};

    #[test]
    fn blank_names_are_rejected() {
        assert!(matches!(teacher::validate_name("  "), Err(ModelError::Validation(_))));
        assert!(matches!(course::validate_title(""), Err(ModelError::Validation(_))));
        assert!(matches!(student::validate_email("\t"), Err(ModelError::Validation(_))));
    }

    #[test]
    fn any_non_blank_email_is_accepted() {
        assert!(student::validate_email("e").is_ok());
    }
}
