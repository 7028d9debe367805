use std::sync::Arc;

use tracing::{debug, info, instrument};

use models::teacher;

use crate::batch;
use crate::compose::fetch_related;
use crate::domain::entity::TEACHER;
use crate::domain::{NewTeacher, TeacherPatch, TeacherView};
use crate::errors::ServiceError;
use crate::mapper;
use crate::mutation::require;
use crate::repository::AcademyRepository;

/// Teacher use cases. Department and courses are derived by lookup; the
/// links themselves live on the department and course rows.
pub struct TeacherService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: AcademyRepository + ?Sized> TeacherService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: NewTeacher) -> Result<TeacherView, ServiceError> {
        let created = self.repo.insert_teacher(&input.name).await?;
        info!(teacher_id = created.id, "teacher_created");
        Ok(mapper::teacher_summary(&created))
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i64) -> Result<TeacherView, ServiceError> {
        let teacher = require(self.repo.find_teacher(id), TEACHER, id).await?;
        self.compose(teacher).await
    }

    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<TeacherView>, ServiceError> {
        let teachers = self.repo.list_teachers().await?;
        let ids = batch::parent_ids(&teachers, |t| t.id);
        let (departments, courses) = tokio::try_join!(
            self.repo.find_departments_by_head_ids(&ids),
            self.repo.find_courses_by_teacher_ids(&ids),
        )?;
        debug!(teachers = teachers.len(), departments = departments.len(), courses = courses.len(), "teacher relations fetched");

        let departments = batch::index_by(departments, |d| d.head_of_department_id);
        let courses = batch::group_by(courses, |c| c.teacher_id);
        Ok(teachers
            .iter()
            .map(|t| {
                let key = Some(t.id);
                mapper::teacher_view(t, departments.get(&key), courses.get(&key))
            })
            .collect())
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i64, patch: TeacherPatch) -> Result<TeacherView, ServiceError> {
        let mut teacher = require(self.repo.find_teacher(id), TEACHER, id).await?;
        let changed = mapper::apply_teacher_patch(&mut teacher, &patch);
        let teacher = self.repo.update_teacher(teacher).await?;
        info!(teacher_id = id, changed, "teacher_updated");
        self.compose(teacher).await
    }

    /// Courses and departments pointing at the teacher are unlinked by the store.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        self.repo.delete_teacher(id).await?;
        info!(teacher_id = id, "teacher_deleted");
        Ok(())
    }

    async fn compose(&self, teacher: teacher::Model) -> Result<TeacherView, ServiceError> {
        let id = teacher.id;
        let c = fetch_related(
            teacher,
            self.repo.find_department_by_head_id(id),
            self.repo.find_courses_by_teacher_id(id),
        )
        .await?;
        Ok(mapper::teacher_view(&c.parent, c.one.as_ref(), &c.many))
    }
}
