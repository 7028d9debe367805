//! Flat join rows returned by the batch relation queries. Each row carries the
//! parent id next to the related entity's columns.
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

/// One student enrolled in one course, keyed by `course_id`.
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize, Deserialize)]
pub struct CourseStudentRow {
    pub course_id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub student_email: String,
}

/// One course a student is enrolled in, keyed by `student_id`.
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize, Deserialize)]
pub struct StudentCourseRow {
    pub student_id: i64,
    pub course_id: i64,
    pub course_title: String,
    pub course_teacher_id: Option<i64>,
}

/// The teacher assigned to a course, keyed by `course_id`.
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize, Deserialize)]
pub struct CourseTeacherRow {
    pub course_id: i64,
    pub teacher_id: i64,
    pub teacher_name: String,
}
