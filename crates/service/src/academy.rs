use std::sync::Arc;

use crate::repository::AcademyRepository;
use crate::services::{CourseService, DepartmentService, StudentService, TeacherService};

/// The four entity services over one shared repository.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use service::academy::Academy;
/// use service::domain::NewCourse;
/// use service::repository::mock::InMemoryRepository;
///
/// let academy = Academy::new(Arc::new(InMemoryRepository::new()));
/// let course = tokio_test::block_on(academy.courses.create(NewCourse { title: "Logic".into() })).unwrap();
/// assert!(course.teacher.is_none());
/// ```
pub struct Academy<R: ?Sized> {
    pub students: StudentService<R>,
    pub teachers: TeacherService<R>,
    pub courses: CourseService<R>,
    pub departments: DepartmentService<R>,
}

impl<R: AcademyRepository + ?Sized> Academy<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            students: StudentService::new(repo.clone()),
            teachers: TeacherService::new(repo.clone()),
            courses: CourseService::new(repo.clone()),
            departments: DepartmentService::new(repo),
        }
    }
}
