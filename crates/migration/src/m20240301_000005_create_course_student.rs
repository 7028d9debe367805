//! Create `course_student` join table realising the course/student many-to-many edge.
//!
//! The (course_id, student_id) pair is intentionally not unique.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CourseStudent::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseStudent::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseStudent::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(CourseStudent::StudentId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_student_course")
                            .from(CourseStudent::Table, CourseStudent::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_student_student")
                            .from(CourseStudent::Table, CourseStudent::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CourseStudent::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CourseStudent { Table, Id, CourseId, StudentId }

#[derive(DeriveIden)]
enum Courses { Table, Id }

#[derive(DeriveIden)]
enum Students { Table, Id }
