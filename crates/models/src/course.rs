use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::{course_student, student, teacher};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub teacher_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Teacher,
    CourseStudent,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Teacher => Entity::belongs_to(teacher::Entity)
                .from(Column::TeacherId)
                .to(teacher::Column::Id)
                .into(),
            Relation::CourseStudent => Entity::has_many(course_student::Entity).into(),
        }
    }
}

impl Related<teacher::Entity> for Entity {
    fn to() -> RelationDef { Relation::Teacher.def() }
}

impl Related<course_student::Entity> for Entity {
    fn to() -> RelationDef { Relation::CourseStudent.def() }
}

impl Related<student::Entity> for Entity {
    fn to() -> RelationDef { course_student::Relation::Student.def() }
    fn via() -> Option<RelationDef> { Some(course_student::Relation::Course.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_title(title: &str) -> Result<(), ModelError> {
    errors::require_text("title", title)
}

pub async fn create(db: &DatabaseConnection, title: &str) -> Result<Model, ModelError> {
    validate_title(title)?;
    let am = ActiveModel {
        title: Set(title.to_string()),
        teacher_id: Set(None),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
