use async_trait::async_trait;

use models::views::{CourseStudentRow, CourseTeacherRow, StudentCourseRow};
use models::{course, department, student, teacher};

use crate::errors::ServiceError;

/// Storage contract consumed by the services.
///
/// Single-parent relation lookups serve one composite view at a time. The
/// `*_by_*_ids` forms are one query each for a whole list of parents and are
/// only used by the batch aggregator. Deletes succeed when the row is absent.
#[async_trait]
pub trait AcademyRepository: Send + Sync {
    async fn insert_student(&self, name: &str, email: &str) -> Result<student::Model, ServiceError>;
    async fn find_student(&self, id: i64) -> Result<Option<student::Model>, ServiceError>;
    async fn list_students(&self) -> Result<Vec<student::Model>, ServiceError>;
    async fn update_student(&self, model: student::Model) -> Result<student::Model, ServiceError>;
    async fn delete_student(&self, id: i64) -> Result<(), ServiceError>;

    async fn insert_teacher(&self, name: &str) -> Result<teacher::Model, ServiceError>;
    async fn find_teacher(&self, id: i64) -> Result<Option<teacher::Model>, ServiceError>;
    async fn list_teachers(&self) -> Result<Vec<teacher::Model>, ServiceError>;
    async fn update_teacher(&self, model: teacher::Model) -> Result<teacher::Model, ServiceError>;
    async fn delete_teacher(&self, id: i64) -> Result<(), ServiceError>;

    async fn insert_course(&self, title: &str) -> Result<course::Model, ServiceError>;
    async fn find_course(&self, id: i64) -> Result<Option<course::Model>, ServiceError>;
    async fn list_courses(&self) -> Result<Vec<course::Model>, ServiceError>;
    async fn update_course(&self, model: course::Model) -> Result<course::Model, ServiceError>;
    async fn delete_course(&self, id: i64) -> Result<(), ServiceError>;

    async fn insert_department(&self, name: &str) -> Result<department::Model, ServiceError>;
    async fn find_department(&self, id: i64) -> Result<Option<department::Model>, ServiceError>;
    async fn list_departments(&self) -> Result<Vec<department::Model>, ServiceError>;
    async fn update_department(&self, model: department::Model) -> Result<department::Model, ServiceError>;
    async fn delete_department(&self, id: i64) -> Result<(), ServiceError>;

    async fn find_teacher_by_course_id(&self, course_id: i64) -> Result<Option<teacher::Model>, ServiceError>;
    async fn find_students_by_course_id(&self, course_id: i64) -> Result<Vec<student::Model>, ServiceError>;
    async fn find_courses_by_student_id(&self, student_id: i64) -> Result<Vec<course::Model>, ServiceError>;
    async fn find_courses_by_teacher_id(&self, teacher_id: i64) -> Result<Vec<course::Model>, ServiceError>;
    async fn find_department_by_head_id(&self, teacher_id: i64) -> Result<Option<department::Model>, ServiceError>;

    async fn find_teachers_by_course_ids(&self, course_ids: &[i64]) -> Result<Vec<CourseTeacherRow>, ServiceError>;
    async fn find_students_by_course_ids(&self, course_ids: &[i64]) -> Result<Vec<CourseStudentRow>, ServiceError>;
    async fn find_courses_by_student_ids(&self, student_ids: &[i64]) -> Result<Vec<StudentCourseRow>, ServiceError>;
    async fn find_courses_by_teacher_ids(&self, teacher_ids: &[i64]) -> Result<Vec<course::Model>, ServiceError>;
    async fn find_departments_by_head_ids(&self, teacher_ids: &[i64]) -> Result<Vec<department::Model>, ServiceError>;
    async fn find_teachers_by_ids(&self, ids: &[i64]) -> Result<Vec<teacher::Model>, ServiceError>;

    /// Add one course/student edge. No duplicate check.
    async fn insert_course_student(&self, course_id: i64, student_id: i64) -> Result<(), ServiceError>;
}

/// In-memory repository for tests and doc examples.
///
/// Counts every call per method name and can be told to fail a given method,
/// which is how the query-count and error-propagation properties are checked.
pub mod mock {
    use super::*;
    use sea_orm::DbErr;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct Tables {
        next_id: i64,
        students: BTreeMap<i64, student::Model>,
        teachers: BTreeMap<i64, teacher::Model>,
        courses: BTreeMap<i64, course::Model>,
        departments: BTreeMap<i64, department::Model>,
        // (course_id, student_id) in insertion order
        enrollments: Vec<(i64, i64)>,
    }

    impl Tables {
        fn next_id(&mut self) -> i64 {
            self.next_id += 1;
            self.next_id
        }

        fn enrolled_students(&self, course_id: i64) -> impl Iterator<Item = &student::Model> {
            self.enrollments
                .iter()
                .filter(move |(c, _)| *c == course_id)
                .filter_map(|(_, s)| self.students.get(s))
        }

        fn enrolled_courses(&self, student_id: i64) -> impl Iterator<Item = &course::Model> {
            self.enrollments
                .iter()
                .filter(move |(_, s)| *s == student_id)
                .filter_map(|(c, _)| self.courses.get(c))
        }
    }

    #[derive(Default)]
    pub struct InMemoryRepository {
        tables: Mutex<Tables>,
        calls: Mutex<HashMap<&'static str, usize>>,
        fail_on: Mutex<Option<&'static str>>,
    }

    fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
        m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn not_updated() -> ServiceError {
        ServiceError::Db(DbErr::RecordNotUpdated)
    }

    impl InMemoryRepository {
        pub fn new() -> Self { Self::default() }

        /// Number of calls made to `method` so far.
        pub fn calls(&self, method: &str) -> usize {
            lock(&self.calls).get(method).copied().unwrap_or(0)
        }

        /// Calls to relation lookups (`find_*_by_*`).
        pub fn relation_calls(&self) -> usize {
            lock(&self.calls).iter().filter(|(k, _)| k.contains("_by_")).map(|(_, v)| v).sum()
        }

        /// Calls that write to the store.
        pub fn write_calls(&self) -> usize {
            lock(&self.calls)
                .iter()
                .filter(|(k, _)| k.starts_with("insert_") || k.starts_with("update_") || k.starts_with("delete_"))
                .map(|(_, v)| v)
                .sum()
        }

        pub fn reset_calls(&self) {
            lock(&self.calls).clear();
        }

        /// Make every later call to `method` fail with a store error.
        pub fn fail_on(&self, method: &'static str) {
            *lock(&self.fail_on) = Some(method);
        }

        fn record(&self, method: &'static str) -> Result<(), ServiceError> {
            *lock(&self.calls).entry(method).or_default() += 1;
            if *lock(&self.fail_on) == Some(method) {
                return Err(ServiceError::Db(DbErr::Custom(format!("{method} failed"))));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl AcademyRepository for InMemoryRepository {
        async fn insert_student(&self, name: &str, email: &str) -> Result<student::Model, ServiceError> {
            self.record("insert_student")?;
            student::validate_name(name)?;
            student::validate_email(email)?;
            let mut t = lock(&self.tables);
            if t.students.values().any(|s| s.email == email) {
                return Err(ServiceError::Db(DbErr::Custom(format!("duplicate key value violates unique constraint: email {email}"))));
            }
            let s = student::Model { id: t.next_id(), name: name.to_string(), email: email.to_string() };
            t.students.insert(s.id, s.clone());
            Ok(s)
        }

        async fn find_student(&self, id: i64) -> Result<Option<student::Model>, ServiceError> {
            self.record("find_student")?;
            Ok(lock(&self.tables).students.get(&id).cloned())
        }

        async fn list_students(&self) -> Result<Vec<student::Model>, ServiceError> {
            self.record("list_students")?;
            Ok(lock(&self.tables).students.values().cloned().collect())
        }

        async fn update_student(&self, model: student::Model) -> Result<student::Model, ServiceError> {
            self.record("update_student")?;
            let mut t = lock(&self.tables);
            let slot = t.students.get_mut(&model.id).ok_or_else(not_updated)?;
            *slot = model.clone();
            Ok(model)
        }

        async fn delete_student(&self, id: i64) -> Result<(), ServiceError> {
            self.record("delete_student")?;
            let mut t = lock(&self.tables);
            t.students.remove(&id);
            t.enrollments.retain(|(_, s)| *s != id);
            Ok(())
        }

        async fn insert_teacher(&self, name: &str) -> Result<teacher::Model, ServiceError> {
            self.record("insert_teacher")?;
            teacher::validate_name(name)?;
            let mut t = lock(&self.tables);
            let m = teacher::Model { id: t.next_id(), name: name.to_string() };
            t.teachers.insert(m.id, m.clone());
            Ok(m)
        }

        async fn find_teacher(&self, id: i64) -> Result<Option<teacher::Model>, ServiceError> {
            self.record("find_teacher")?;
            Ok(lock(&self.tables).teachers.get(&id).cloned())
        }

        async fn list_teachers(&self) -> Result<Vec<teacher::Model>, ServiceError> {
            self.record("list_teachers")?;
            Ok(lock(&self.tables).teachers.values().cloned().collect())
        }

        async fn update_teacher(&self, model: teacher::Model) -> Result<teacher::Model, ServiceError> {
            self.record("update_teacher")?;
            let mut t = lock(&self.tables);
            let slot = t.teachers.get_mut(&model.id).ok_or_else(not_updated)?;
            *slot = model.clone();
            Ok(model)
        }

        async fn delete_teacher(&self, id: i64) -> Result<(), ServiceError> {
            self.record("delete_teacher")?;
            let mut t = lock(&self.tables);
            t.teachers.remove(&id);
            // ON DELETE SET NULL
            for c in t.courses.values_mut().filter(|c| c.teacher_id == Some(id)) {
                c.teacher_id = None;
            }
            for d in t.departments.values_mut().filter(|d| d.head_of_department_id == Some(id)) {
                d.head_of_department_id = None;
            }
            Ok(())
        }

        async fn insert_course(&self, title: &str) -> Result<course::Model, ServiceError> {
            self.record("insert_course")?;
            course::validate_title(title)?;
            let mut t = lock(&self.tables);
            let c = course::Model { id: t.next_id(), title: title.to_string(), teacher_id: None };
            t.courses.insert(c.id, c.clone());
            Ok(c)
        }

        async fn find_course(&self, id: i64) -> Result<Option<course::Model>, ServiceError> {
            self.record("find_course")?;
            Ok(lock(&self.tables).courses.get(&id).cloned())
        }

        async fn list_courses(&self) -> Result<Vec<course::Model>, ServiceError> {
            self.record("list_courses")?;
            Ok(lock(&self.tables).courses.values().cloned().collect())
        }

        async fn update_course(&self, model: course::Model) -> Result<course::Model, ServiceError> {
            self.record("update_course")?;
            let mut t = lock(&self.tables);
            let slot = t.courses.get_mut(&model.id).ok_or_else(not_updated)?;
            *slot = model.clone();
            Ok(model)
        }

        async fn delete_course(&self, id: i64) -> Result<(), ServiceError> {
            self.record("delete_course")?;
            let mut t = lock(&self.tables);
            t.courses.remove(&id);
            t.enrollments.retain(|(c, _)| *c != id);
            Ok(())
        }

        async fn insert_department(&self, name: &str) -> Result<department::Model, ServiceError> {
            self.record("insert_department")?;
            department::validate_name(name)?;
            let mut t = lock(&self.tables);
            let d = department::Model { id: t.next_id(), name: name.to_string(), head_of_department_id: None };
            t.departments.insert(d.id, d.clone());
            Ok(d)
        }

        async fn find_department(&self, id: i64) -> Result<Option<department::Model>, ServiceError> {
            self.record("find_department")?;
            Ok(lock(&self.tables).departments.get(&id).cloned())
        }

        async fn list_departments(&self) -> Result<Vec<department::Model>, ServiceError> {
            self.record("list_departments")?;
            Ok(lock(&self.tables).departments.values().cloned().collect())
        }

        async fn update_department(&self, model: department::Model) -> Result<department::Model, ServiceError> {
            self.record("update_department")?;
            let mut t = lock(&self.tables);
            let slot = t.departments.get_mut(&model.id).ok_or_else(not_updated)?;
            *slot = model.clone();
            Ok(model)
        }

        async fn delete_department(&self, id: i64) -> Result<(), ServiceError> {
            self.record("delete_department")?;
            lock(&self.tables).departments.remove(&id);
            Ok(())
        }

        async fn find_teacher_by_course_id(&self, course_id: i64) -> Result<Option<teacher::Model>, ServiceError> {
            self.record("find_teacher_by_course_id")?;
            let t = lock(&self.tables);
            Ok(t.courses
                .get(&course_id)
                .and_then(|c| c.teacher_id)
                .and_then(|tid| t.teachers.get(&tid))
                .cloned())
        }

        async fn find_students_by_course_id(&self, course_id: i64) -> Result<Vec<student::Model>, ServiceError> {
            self.record("find_students_by_course_id")?;
            let t = lock(&self.tables);
            Ok(t.enrolled_students(course_id).cloned().collect())
        }

        async fn find_courses_by_student_id(&self, student_id: i64) -> Result<Vec<course::Model>, ServiceError> {
            self.record("find_courses_by_student_id")?;
            let t = lock(&self.tables);
            Ok(t.enrolled_courses(student_id).cloned().collect())
        }

        async fn find_courses_by_teacher_id(&self, teacher_id: i64) -> Result<Vec<course::Model>, ServiceError> {
            self.record("find_courses_by_teacher_id")?;
            let t = lock(&self.tables);
            Ok(t.courses.values().filter(|c| c.teacher_id == Some(teacher_id)).cloned().collect())
        }

        async fn find_department_by_head_id(&self, teacher_id: i64) -> Result<Option<department::Model>, ServiceError> {
            self.record("find_department_by_head_id")?;
            let t = lock(&self.tables);
            Ok(t.departments.values().find(|d| d.head_of_department_id == Some(teacher_id)).cloned())
        }

        async fn find_teachers_by_course_ids(&self, course_ids: &[i64]) -> Result<Vec<CourseTeacherRow>, ServiceError> {
            self.record("find_teachers_by_course_ids")?;
            let t = lock(&self.tables);
            Ok(t.courses
                .values()
                .filter(|c| course_ids.contains(&c.id))
                .filter_map(|c| {
                    let teacher = t.teachers.get(&c.teacher_id?)?;
                    Some(CourseTeacherRow { course_id: c.id, teacher_id: teacher.id, teacher_name: teacher.name.clone() })
                })
                .collect())
        }

        async fn find_students_by_course_ids(&self, course_ids: &[i64]) -> Result<Vec<CourseStudentRow>, ServiceError> {
            self.record("find_students_by_course_ids")?;
            let t = lock(&self.tables);
            Ok(t.enrollments
                .iter()
                .filter(|(c, _)| course_ids.contains(c))
                .filter_map(|(c, s)| {
                    let s = t.students.get(s)?;
                    Some(CourseStudentRow { course_id: *c, student_id: s.id, student_name: s.name.clone(), student_email: s.email.clone() })
                })
                .collect())
        }

        async fn find_courses_by_student_ids(&self, student_ids: &[i64]) -> Result<Vec<StudentCourseRow>, ServiceError> {
            self.record("find_courses_by_student_ids")?;
            let t = lock(&self.tables);
            Ok(t.enrollments
                .iter()
                .filter(|(_, s)| student_ids.contains(s))
                .filter_map(|(c, s)| {
                    let c = t.courses.get(c)?;
                    Some(StudentCourseRow { student_id: *s, course_id: c.id, course_title: c.title.clone(), course_teacher_id: c.teacher_id })
                })
                .collect())
        }

        async fn find_courses_by_teacher_ids(&self, teacher_ids: &[i64]) -> Result<Vec<course::Model>, ServiceError> {
            self.record("find_courses_by_teacher_ids")?;
            let t = lock(&self.tables);
            Ok(t.courses
                .values()
                .filter(|c| c.teacher_id.is_some_and(|tid| teacher_ids.contains(&tid)))
                .cloned()
                .collect())
        }

        async fn find_departments_by_head_ids(&self, teacher_ids: &[i64]) -> Result<Vec<department::Model>, ServiceError> {
            self.record("find_departments_by_head_ids")?;
            let t = lock(&self.tables);
            Ok(t.departments
                .values()
                .filter(|d| d.head_of_department_id.is_some_and(|h| teacher_ids.contains(&h)))
                .cloned()
                .collect())
        }

        async fn find_teachers_by_ids(&self, ids: &[i64]) -> Result<Vec<teacher::Model>, ServiceError> {
            self.record("find_teachers_by_ids")?;
            let t = lock(&self.tables);
            Ok(t.teachers.values().filter(|m| ids.contains(&m.id)).cloned().collect())
        }

        async fn insert_course_student(&self, course_id: i64, student_id: i64) -> Result<(), ServiceError> {
            self.record("insert_course_student")?;
            lock(&self.tables).enrollments.push((course_id, student_id));
            Ok(())
        }
    }
}
