use std::sync::Arc;

use tracing::{debug, info, instrument};

use models::department;

use crate::batch;
use crate::compose::fetch_one;
use crate::domain::entity::{DEPARTMENT, TEACHER};
use crate::domain::{DepartmentPatch, DepartmentView, NewDepartment};
use crate::errors::ServiceError;
use crate::mapper;
use crate::mutation::{require, require_both};
use crate::repository::AcademyRepository;

pub struct DepartmentService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: AcademyRepository + ?Sized> DepartmentService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: NewDepartment) -> Result<DepartmentView, ServiceError> {
        let created = self.repo.insert_department(&input.name).await?;
        info!(department_id = created.id, "department_created");
        Ok(mapper::department_summary(&created))
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i64) -> Result<DepartmentView, ServiceError> {
        let department = require(self.repo.find_department(id), DEPARTMENT, id).await?;
        self.compose(department).await
    }

    /// All departments with their heads, fetched in one query.
    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<DepartmentView>, ServiceError> {
        let departments = self.repo.list_departments().await?;
        let head_ids = batch::referenced_ids(&departments, |d| d.head_of_department_id);
        let heads = self.repo.find_teachers_by_ids(&head_ids).await?;
        debug!(departments = departments.len(), heads = heads.len(), "department heads fetched");

        let heads = batch::index_by(heads, |t| t.id);
        Ok(departments
            .iter()
            .map(|d| mapper::department_view(d, d.head_of_department_id.and_then(|h| heads.get(&h))))
            .collect())
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i64, patch: DepartmentPatch) -> Result<DepartmentView, ServiceError> {
        let mut department = require(self.repo.find_department(id), DEPARTMENT, id).await?;
        let changed = mapper::apply_department_patch(&mut department, &patch);
        let department = self.repo.update_department(department).await?;
        info!(department_id = id, changed, "department_updated");
        self.compose(department).await
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        self.repo.delete_department(id).await?;
        info!(department_id = id, "department_deleted");
        Ok(())
    }

    /// Make `teacher_id` head of the department and return the refreshed view.
    #[instrument(skip(self))]
    pub async fn link_head(&self, department_id: i64, teacher_id: i64) -> Result<DepartmentView, ServiceError> {
        let (mut department, teacher) = require_both(
            require(self.repo.find_department(department_id), DEPARTMENT, department_id),
            require(self.repo.find_teacher(teacher_id), TEACHER, teacher_id),
        )
        .await?;
        department.head_of_department_id = Some(teacher.id);
        let department = self.repo.update_department(department).await?;
        info!(department_id, teacher_id, "head_linked_to_department");
        self.compose(department).await
    }

    async fn compose(&self, department: department::Model) -> Result<DepartmentView, ServiceError> {
        let head_id = department.head_of_department_id;
        let repo = &self.repo;
        let c = fetch_one(department, async move {
            match head_id {
                Some(id) => repo.find_teacher(id).await,
                None => Ok(None),
            }
        })
        .await?;
        Ok(mapper::department_view(&c.parent, c.one.as_ref()))
    }
}
