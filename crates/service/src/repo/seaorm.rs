use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};

use models::views::{CourseStudentRow, CourseTeacherRow, StudentCourseRow};
use models::{course, course_student, department, student, teacher};

use crate::errors::ServiceError;
use crate::repository::AcademyRepository;

/// Postgres-backed repository. Every batch lookup is a single `IN (...)` query.
pub struct SeaOrmAcademyRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAcademyRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl AcademyRepository for SeaOrmAcademyRepository {
    async fn insert_student(&self, name: &str, email: &str) -> Result<student::Model, ServiceError> {
        Ok(student::create(&self.db, name, email).await?)
    }

    async fn find_student(&self, id: i64) -> Result<Option<student::Model>, ServiceError> {
        Ok(student::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn list_students(&self) -> Result<Vec<student::Model>, ServiceError> {
        Ok(student::Entity::find().order_by_asc(student::Column::Id).all(&self.db).await?)
    }

    async fn update_student(&self, model: student::Model) -> Result<student::Model, ServiceError> {
        Ok(model.into_active_model().reset_all().update(&self.db).await?)
    }

    async fn delete_student(&self, id: i64) -> Result<(), ServiceError> {
        student::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn insert_teacher(&self, name: &str) -> Result<teacher::Model, ServiceError> {
        Ok(teacher::create(&self.db, name).await?)
    }

    async fn find_teacher(&self, id: i64) -> Result<Option<teacher::Model>, ServiceError> {
        Ok(teacher::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn list_teachers(&self) -> Result<Vec<teacher::Model>, ServiceError> {
        Ok(teacher::Entity::find().order_by_asc(teacher::Column::Id).all(&self.db).await?)
    }

    async fn update_teacher(&self, model: teacher::Model) -> Result<teacher::Model, ServiceError> {
        Ok(model.into_active_model().reset_all().update(&self.db).await?)
    }

    async fn delete_teacher(&self, id: i64) -> Result<(), ServiceError> {
        teacher::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn insert_course(&self, title: &str) -> Result<course::Model, ServiceError> {
        Ok(course::create(&self.db, title).await?)
    }

    async fn find_course(&self, id: i64) -> Result<Option<course::Model>, ServiceError> {
        Ok(course::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn list_courses(&self) -> Result<Vec<course::Model>, ServiceError> {
        Ok(course::Entity::find().order_by_asc(course::Column::Id).all(&self.db).await?)
    }

    async fn update_course(&self, model: course::Model) -> Result<course::Model, ServiceError> {
        Ok(model.into_active_model().reset_all().update(&self.db).await?)
    }

    async fn delete_course(&self, id: i64) -> Result<(), ServiceError> {
        course::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn insert_department(&self, name: &str) -> Result<department::Model, ServiceError> {
        Ok(department::create(&self.db, name).await?)
    }

    async fn find_department(&self, id: i64) -> Result<Option<department::Model>, ServiceError> {
        Ok(department::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn list_departments(&self) -> Result<Vec<department::Model>, ServiceError> {
        Ok(department::Entity::find().order_by_asc(department::Column::Id).all(&self.db).await?)
    }

    async fn update_department(&self, model: department::Model) -> Result<department::Model, ServiceError> {
        Ok(model.into_active_model().reset_all().update(&self.db).await?)
    }

    async fn delete_department(&self, id: i64) -> Result<(), ServiceError> {
        department::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn find_teacher_by_course_id(&self, course_id: i64) -> Result<Option<teacher::Model>, ServiceError> {
        Ok(teacher::Entity::find()
            .join(JoinType::InnerJoin, teacher::Relation::Courses.def())
            .filter(course::Column::Id.eq(course_id))
            .one(&self.db)
            .await?)
    }

    async fn find_students_by_course_id(&self, course_id: i64) -> Result<Vec<student::Model>, ServiceError> {
        Ok(student::Entity::find()
            .join(JoinType::InnerJoin, student::Relation::CourseStudent.def())
            .filter(course_student::Column::CourseId.eq(course_id))
            .order_by_asc(course_student::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn find_courses_by_student_id(&self, student_id: i64) -> Result<Vec<course::Model>, ServiceError> {
        Ok(course::Entity::find()
            .join(JoinType::InnerJoin, course::Relation::CourseStudent.def())
            .filter(course_student::Column::StudentId.eq(student_id))
            .order_by_asc(course_student::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn find_courses_by_teacher_id(&self, teacher_id: i64) -> Result<Vec<course::Model>, ServiceError> {
        Ok(course::Entity::find()
            .filter(course::Column::TeacherId.eq(teacher_id))
            .order_by_asc(course::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn find_department_by_head_id(&self, teacher_id: i64) -> Result<Option<department::Model>, ServiceError> {
        Ok(department::Entity::find()
            .filter(department::Column::HeadOfDepartmentId.eq(teacher_id))
            .order_by_asc(department::Column::Id)
            .one(&self.db)
            .await?)
    }

    async fn find_teachers_by_course_ids(&self, course_ids: &[i64]) -> Result<Vec<CourseTeacherRow>, ServiceError> {
        Ok(course::Entity::find()
            .select_only()
            .column_as(course::Column::Id, "course_id")
            .column_as(teacher::Column::Id, "teacher_id")
            .column_as(teacher::Column::Name, "teacher_name")
            .join(JoinType::InnerJoin, course::Relation::Teacher.def())
            .filter(course::Column::Id.is_in(course_ids.iter().copied()))
            .order_by_asc(course::Column::Id)
            .into_model::<CourseTeacherRow>()
            .all(&self.db)
            .await?)
    }

    async fn find_students_by_course_ids(&self, course_ids: &[i64]) -> Result<Vec<CourseStudentRow>, ServiceError> {
        Ok(course_student::Entity::find()
            .select_only()
            .column_as(course_student::Column::CourseId, "course_id")
            .column_as(student::Column::Id, "student_id")
            .column_as(student::Column::Name, "student_name")
            .column_as(student::Column::Email, "student_email")
            .join(JoinType::InnerJoin, course_student::Relation::Student.def())
            .filter(course_student::Column::CourseId.is_in(course_ids.iter().copied()))
            .order_by_asc(course_student::Column::Id)
            .into_model::<CourseStudentRow>()
            .all(&self.db)
            .await?)
    }

    async fn find_courses_by_student_ids(&self, student_ids: &[i64]) -> Result<Vec<StudentCourseRow>, ServiceError> {
        Ok(course_student::Entity::find()
            .select_only()
            .column_as(course_student::Column::StudentId, "student_id")
            .column_as(course::Column::Id, "course_id")
            .column_as(course::Column::Title, "course_title")
            .column_as(course::Column::TeacherId, "course_teacher_id")
            .join(JoinType::InnerJoin, course_student::Relation::Course.def())
            .filter(course_student::Column::StudentId.is_in(student_ids.iter().copied()))
            .order_by_asc(course_student::Column::Id)
            .into_model::<StudentCourseRow>()
            .all(&self.db)
            .await?)
    }

    async fn find_courses_by_teacher_ids(&self, teacher_ids: &[i64]) -> Result<Vec<course::Model>, ServiceError> {
        Ok(course::Entity::find()
            .filter(course::Column::TeacherId.is_in(teacher_ids.iter().copied()))
            .order_by_asc(course::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn find_departments_by_head_ids(&self, teacher_ids: &[i64]) -> Result<Vec<department::Model>, ServiceError> {
        Ok(department::Entity::find()
            .filter(department::Column::HeadOfDepartmentId.is_in(teacher_ids.iter().copied()))
            .order_by_asc(department::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn find_teachers_by_ids(&self, ids: &[i64]) -> Result<Vec<teacher::Model>, ServiceError> {
        Ok(teacher::Entity::find()
            .filter(teacher::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(teacher::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn insert_course_student(&self, course_id: i64, student_id: i64) -> Result<(), ServiceError> {
        course_student::insert(&self.db, course_id, student_id).await?;
        Ok(())
    }
}
