//! External view shapes and mutation inputs.
//!
//! Relation fields are always present: a missing single relation is `None`,
//! a missing list relation is empty.

use serde::{Deserialize, Serialize};

/// Student as returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub courses: Vec<CourseView>,
}

/// Teacher as returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherView {
    pub id: i64,
    pub name: String,
    pub department: Option<DepartmentView>,
    pub courses: Vec<CourseView>,
}

/// Course as returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseView {
    pub id: i64,
    pub title: String,
    pub teacher: Option<TeacherView>,
    pub students: Vec<StudentView>,
}

/// Department as returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentView {
    pub id: i64,
    pub name: String,
    pub head_of_department: Option<Box<TeacherView>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTeacher {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCourse {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDepartment {
    pub name: String,
}

/// Partial update; omitted or blank fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeacherPatch {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoursePatch {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepartmentPatch {
    #[serde(default)]
    pub name: Option<String>,
}

/// Entity names used in not-found errors.
pub mod entity {
    pub const STUDENT: &str = "Student";
    pub const TEACHER: &str = "Teacher";
    pub const COURSE: &str = "Course";
    pub const DEPARTMENT: &str = "Department";
}
