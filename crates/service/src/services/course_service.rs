use std::sync::Arc;

use tracing::{debug, info, instrument};

use models::course;

use crate::batch;
use crate::compose::fetch_related;
use crate::domain::entity::{COURSE, TEACHER};
use crate::domain::{CoursePatch, CourseView, NewCourse};
use crate::errors::ServiceError;
use crate::mapper;
use crate::mutation::{require, require_both};
use crate::repository::AcademyRepository;

/// Course use cases: CRUD plus assigning the course's teacher.
pub struct CourseService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: AcademyRepository + ?Sized> CourseService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create(&self, input: NewCourse) -> Result<CourseView, ServiceError> {
        let created = self.repo.insert_course(&input.title).await?;
        info!(course_id = created.id, "course_created");
        Ok(mapper::course_summary(&created))
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i64) -> Result<CourseView, ServiceError> {
        let course = require(self.repo.find_course(id), COURSE, id).await?;
        self.compose(course).await
    }

    /// All courses with teacher and students, using two relation queries in total.
    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<CourseView>, ServiceError> {
        let courses = self.repo.list_courses().await?;
        let ids = batch::parent_ids(&courses, |c| c.id);
        let (teacher_rows, student_rows) = tokio::try_join!(
            self.repo.find_teachers_by_course_ids(&ids),
            self.repo.find_students_by_course_ids(&ids),
        )?;
        debug!(courses = courses.len(), teachers = teacher_rows.len(), enrollments = student_rows.len(), "course relations fetched");

        let teachers = batch::index_by(teacher_rows, |r| r.course_id);
        let students = batch::group_by(student_rows, |r| r.course_id);
        Ok(courses
            .iter()
            .map(|c| {
                mapper::course_view(
                    c,
                    teachers.get(&c.id).map(mapper::teacher_from_row),
                    students.get(&c.id).iter().map(mapper::student_from_row).collect(),
                )
            })
            .collect())
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i64, patch: CoursePatch) -> Result<CourseView, ServiceError> {
        let mut course = require(self.repo.find_course(id), COURSE, id).await?;
        let changed = mapper::apply_course_patch(&mut course, &patch);
        let course = self.repo.update_course(course).await?;
        info!(course_id = id, changed, "course_updated");
        self.compose(course).await
    }

    /// Deleting an absent course succeeds.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        self.repo.delete_course(id).await?;
        info!(course_id = id, "course_deleted");
        Ok(())
    }

    /// Make `teacher_id` the course's teacher and return the refreshed view.
    #[instrument(skip(self))]
    pub async fn link_teacher(&self, course_id: i64, teacher_id: i64) -> Result<CourseView, ServiceError> {
        let (mut course, teacher) = require_both(
            require(self.repo.find_course(course_id), COURSE, course_id),
            require(self.repo.find_teacher(teacher_id), TEACHER, teacher_id),
        )
        .await?;
        course.teacher_id = Some(teacher.id);
        let course = self.repo.update_course(course).await?;
        info!(course_id, teacher_id, "teacher_linked_to_course");
        self.compose(course).await
    }

    async fn compose(&self, course: course::Model) -> Result<CourseView, ServiceError> {
        let id = course.id;
        let c = fetch_related(
            course,
            self.repo.find_teacher_by_course_id(id),
            self.repo.find_students_by_course_id(id),
        )
        .await?;
        Ok(mapper::course_view(
            &c.parent,
            c.one.as_ref().map(mapper::teacher_summary),
            c.many.iter().map(mapper::student_summary).collect(),
        ))
    }
}
