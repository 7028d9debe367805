//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_teachers;
mod m20240301_000002_create_departments;
mod m20240301_000003_create_courses;
mod m20240301_000004_create_students;
mod m20240301_000005_create_course_student;
mod m20240301_000006_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_teachers::Migration),
            Box::new(m20240301_000002_create_departments::Migration),
            Box::new(m20240301_000003_create_courses::Migration),
            Box::new(m20240301_000004_create_students::Migration),
            Box::new(m20240301_000005_create_course_student::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000006_add_indexes::Migration),
        ]
    }
}
