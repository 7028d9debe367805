use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::{course, course_student};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    CourseStudent,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::CourseStudent => Entity::has_many(course_student::Entity).into(),
        }
    }
}

impl Related<course_student::Entity> for Entity {
    fn to() -> RelationDef { Relation::CourseStudent.def() }
}

impl Related<course::Entity> for Entity {
    fn to() -> RelationDef { course_student::Relation::Course.def() }
    fn via() -> Option<RelationDef> { Some(course_student::Relation::Student.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    errors::require_text("name", name)
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    errors::require_text("email", email)
}

pub async fn create(db: &DatabaseConnection, name: &str, email: &str) -> Result<Model, ModelError> {
    validate_name(name)?;
    validate_email(email)?;
    let am = ActiveModel {
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
