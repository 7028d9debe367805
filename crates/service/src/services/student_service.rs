use std::sync::Arc;

use tracing::{debug, info, instrument};

use models::{course, student};

use crate::batch;
use crate::compose::fetch_many;
use crate::domain::entity::{COURSE, STUDENT};
use crate::domain::{CourseView, NewStudent, StudentPatch, StudentView};
use crate::errors::ServiceError;
use crate::mapper;
use crate::mutation::{require, require_both};
use crate::repository::AcademyRepository;

/// Student use cases: CRUD plus course enrollment.
pub struct StudentService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: AcademyRepository + ?Sized> StudentService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: NewStudent) -> Result<StudentView, ServiceError> {
        let created = self.repo.insert_student(&input.name, &input.email).await?;
        info!(student_id = created.id, "student_created");
        Ok(mapper::student_summary(&created))
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i64) -> Result<StudentView, ServiceError> {
        let student = require(self.repo.find_student(id), STUDENT, id).await?;
        self.compose(student).await
    }

    /// All students with their courses (and each course's teacher).
    ///
    /// One join query for the enrollments, one for the referenced teachers.
    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<StudentView>, ServiceError> {
        let students = self.repo.list_students().await?;
        let ids = batch::parent_ids(&students, |s| s.id);
        let rows = self.repo.find_courses_by_student_ids(&ids).await?;
        let teacher_ids = batch::referenced_ids(&rows, |r| r.course_teacher_id);
        let teachers = self.repo.find_teachers_by_ids(&teacher_ids).await?;
        debug!(students = students.len(), enrollments = rows.len(), teachers = teachers.len(), "student relations fetched");

        let teachers = batch::index_by(teachers, |t| t.id);
        let courses = batch::group_by(rows, |r| r.student_id);
        Ok(students
            .iter()
            .map(|s| {
                let enrolled = courses
                    .get(&s.id)
                    .iter()
                    .map(|row| {
                        let c = mapper::course_from_row(row);
                        let teacher = c.teacher_id.and_then(|tid| teachers.get(&tid));
                        mapper::enrolled_course(&c, teacher)
                    })
                    .collect();
                mapper::student_view(s, enrolled)
            })
            .collect())
    }

    /// Courses the student is enrolled in, each with its teacher.
    ///
    /// An unknown student has no courses.
    #[instrument(skip(self))]
    pub async fn find_courses(&self, student_id: i64) -> Result<Vec<CourseView>, ServiceError> {
        let courses = self.repo.find_courses_by_student_id(student_id).await?;
        self.with_teachers(&courses).await
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i64, patch: StudentPatch) -> Result<StudentView, ServiceError> {
        let mut student = require(self.repo.find_student(id), STUDENT, id).await?;
        let changed = mapper::apply_student_patch(&mut student, &patch);
        let student = self.repo.update_student(student).await?;
        info!(student_id = id, changed, "student_updated");
        self.compose(student).await
    }

    /// Deleting an absent student succeeds.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        self.repo.delete_student(id).await?;
        info!(student_id = id, "student_deleted");
        Ok(())
    }

    /// Enroll the student in a course. Enrolling twice adds a second edge.
    #[instrument(skip(self))]
    pub async fn enroll(&self, student_id: i64, course_id: i64) -> Result<StudentView, ServiceError> {
        let (student, _course) = require_both(
            require(self.repo.find_student(student_id), STUDENT, student_id),
            require(self.repo.find_course(course_id), COURSE, course_id),
        )
        .await?;
        self.repo.insert_course_student(course_id, student_id).await?;
        info!(student_id, course_id, "student_enrolled");
        self.compose(student).await
    }

    async fn compose(&self, student: student::Model) -> Result<StudentView, ServiceError> {
        let id = student.id;
        let c = fetch_many(student, self.repo.find_courses_by_student_id(id)).await?;
        let courses = self.with_teachers(&c.many).await?;
        Ok(mapper::student_view(&c.parent, courses))
    }

    async fn with_teachers(&self, courses: &[course::Model]) -> Result<Vec<CourseView>, ServiceError> {
        let teacher_ids = batch::referenced_ids(courses, |c| c.teacher_id);
        let teachers = if teacher_ids.is_empty() {
            Vec::new()
        } else {
            self.repo.find_teachers_by_ids(&teacher_ids).await?
        };
        let teachers = batch::index_by(teachers, |t| t.id);
        Ok(courses
            .iter()
            .map(|c| mapper::enrolled_course(c, c.teacher_id.and_then(|tid| teachers.get(&tid))))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewCourse, NewTeacher};
    use crate::repository::mock::InMemoryRepository;
    use crate::services::{CourseService, TeacherService};

    fn setup() -> (Arc<InMemoryRepository>, StudentService<InMemoryRepository>) {
        let repo = Arc::new(InMemoryRepository::new());
        (repo.clone(), StudentService::new(repo))
    }

    fn new_student(name: &str, email: &str) -> NewStudent {
        NewStudent { name: name.into(), email: email.into() }
    }

    #[tokio::test]
    async fn enroll_lists_course_on_student() {
        let (repo, svc) = setup();
        let course = CourseService::new(repo.clone()).create(NewCourse { title: "title".into() }).await.unwrap();
        let s = svc.create(new_student("n", "e")).await.unwrap();

        let view = svc.enroll(s.id, course.id).await.unwrap();
        assert_eq!(view.courses.len(), 1);
        assert_eq!(view.courses[0].title, "title");
    }

    #[tokio::test]
    async fn enroll_twice_creates_two_edges() {
        let (repo, svc) = setup();
        let course = CourseService::new(repo.clone()).create(NewCourse { title: "t".into() }).await.unwrap();
        let s = svc.create(new_student("n", "e")).await.unwrap();
        svc.enroll(s.id, course.id).await.unwrap();
        let view = svc.enroll(s.id, course.id).await.unwrap();
        assert_eq!(view.courses.len(), 2);
        assert_eq!(repo.calls("insert_course_student"), 2);
    }

    #[tokio::test]
    async fn enroll_in_missing_course_writes_nothing() {
        let (repo, svc) = setup();
        let s = svc.create(new_student("n", "e")).await.unwrap();
        repo.reset_calls();
        let err = svc.enroll(s.id, 404).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "Course", id: 404 }));
        assert_eq!(repo.calls("insert_course_student"), 0);
        assert_eq!(repo.write_calls(), 0);
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let (_, svc) = setup();
        let s = svc.create(new_student("name", "mail@example.com")).await.unwrap();
        let view = svc.update(s.id, StudentPatch { name: Some("renamed".into()), email: None }).await.unwrap();
        assert_eq!(view.name, "renamed");
        assert_eq!(view.email, "mail@example.com");

        let view = svc.update(s.id, StudentPatch { name: None, email: Some("other@example.com".into()) }).await.unwrap();
        assert_eq!(view.name, "renamed");
        assert_eq!(view.email, "other@example.com");
    }

    #[tokio::test]
    async fn update_missing_student_fails_without_write() {
        let (repo, svc) = setup();
        let err = svc.update(3, StudentPatch::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Student with ID 3 not found");
        assert_eq!(repo.write_calls(), 0);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (_, svc) = setup();
        let s = svc.create(new_student("n", "e")).await.unwrap();
        svc.delete_by_id(s.id).await.unwrap();
        svc.delete_by_id(s.id).await.unwrap();
        assert!(svc.find_by_id(s.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn duplicate_email_surfaces_store_error() {
        let (_, svc) = setup();
        svc.create(new_student("a", "same@x")).await.unwrap();
        let err = svc.create(new_student("b", "same@x")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(_)));
    }

    #[tokio::test]
    async fn find_all_uses_constant_relation_queries() {
        for n in [0usize, 1, 5] {
            let (repo, svc) = setup();
            let courses = CourseService::new(repo.clone());
            let teachers = TeacherService::new(repo.clone());
            for i in 0..n {
                let s = svc.create(new_student("s", &format!("s{i}@x"))).await.unwrap();
                let c = courses.create(NewCourse { title: format!("c{i}") }).await.unwrap();
                let t = teachers.create(NewTeacher { name: format!("t{i}") }).await.unwrap();
                courses.link_teacher(c.id, t.id).await.unwrap();
                svc.enroll(s.id, c.id).await.unwrap();
            }
            repo.reset_calls();
            let all = svc.find_all().await.unwrap();
            assert_eq!(all.len(), n);
            assert_eq!(repo.relation_calls(), 2, "n = {n}");
            assert!(all.iter().all(|s| s.courses.len() == 1 && s.courses[0].teacher.is_some()));
        }
    }

    #[tokio::test]
    async fn find_courses_carries_teachers() {
        let (repo, svc) = setup();
        let courses = CourseService::new(repo.clone());
        let s = svc.create(new_student("n", "e")).await.unwrap();
        let taught = courses.create(NewCourse { title: "taught".into() }).await.unwrap();
        let untaught = courses.create(NewCourse { title: "untaught".into() }).await.unwrap();
        let t = TeacherService::new(repo.clone()).create(NewTeacher { name: "T".into() }).await.unwrap();
        courses.link_teacher(taught.id, t.id).await.unwrap();
        svc.enroll(s.id, taught.id).await.unwrap();
        svc.enroll(s.id, untaught.id).await.unwrap();

        let list = svc.find_courses(s.id).await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].teacher.as_ref().map(|t| t.name.as_str()), Some("T"));
        assert!(list[1].teacher.is_none());
    }

    #[tokio::test]
    async fn find_courses_of_unknown_student_is_empty() {
        let (_, svc) = setup();
        assert!(svc.find_courses(999).await.unwrap().is_empty());
    }
}
