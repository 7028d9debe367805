use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::teacher;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    /// Ground truth of the department/head relation; a teacher's department is derived from it.
    pub head_of_department_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    HeadOfDepartment,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::HeadOfDepartment => Entity::belongs_to(teacher::Entity)
                .from(Column::HeadOfDepartmentId)
                .to(teacher::Column::Id)
                .into(),
        }
    }
}

impl Related<teacher::Entity> for Entity {
    fn to() -> RelationDef { Relation::HeadOfDepartment.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    errors::require_text("name", name)
}

pub async fn create(db: &DatabaseConnection, name: &str) -> Result<Model, ModelError> {
    validate_name(name)?;
    let am = ActiveModel {
        name: Set(name.to_string()),
        head_of_department_id: Set(None),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
