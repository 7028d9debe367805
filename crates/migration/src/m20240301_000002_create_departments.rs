//! Create `departments` table with nullable FK `head_of_department_id` to `teachers`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Departments::Name, 128).not_null())
                    .col(ColumnDef::new(Departments::HeadOfDepartmentId).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_department_head_teacher")
                            .from(Departments::Table, Departments::HeadOfDepartmentId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Departments::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Departments { Table, Id, Name, HeadOfDepartmentId }

#[derive(DeriveIden)]
enum Teachers { Table, Id }
