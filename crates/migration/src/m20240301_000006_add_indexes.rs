//! Indexes backing the relation lookups (single-parent and batch `IN (...)` forms).
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Courses: lookup by teacher
        manager
            .create_index(
                Index::create()
                    .name("idx_course_teacher")
                    .table(Courses::Table)
                    .col(Courses::TeacherId)
                    .to_owned(),
            )
            .await?;

        // Departments: lookup by head teacher
        manager
            .create_index(
                Index::create()
                    .name("idx_department_head")
                    .table(Departments::Table)
                    .col(Departments::HeadOfDepartmentId)
                    .to_owned(),
            )
            .await?;

        // Join table: both directions
        manager
            .create_index(
                Index::create()
                    .name("idx_course_student_course")
                    .table(CourseStudent::Table)
                    .col(CourseStudent::CourseId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_course_student_student")
                    .table(CourseStudent::Table)
                    .col(CourseStudent::StudentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_course_student_student").table(CourseStudent::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_course_student_course").table(CourseStudent::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_department_head").table(Departments::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_course_teacher").table(Courses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Courses { Table, TeacherId }

#[derive(DeriveIden)]
enum Departments { Table, HeadOfDepartmentId }

#[derive(DeriveIden)]
enum CourseStudent { Table, CourseId, StudentId }
