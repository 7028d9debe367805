//! Services over the Postgres repository. Skipped without `DATABASE_URL`.

use std::sync::Arc;

use crate::academy::Academy;
use crate::domain::{NewCourse, NewDepartment, NewStudent, NewTeacher, StudentPatch};
use crate::errors::ServiceError;
use crate::repo::seaorm::SeaOrmAcademyRepository;
use crate::test_support::{get_db, unique};

async fn academy() -> Option<Academy<SeaOrmAcademyRepository>> {
    let db = get_db().await?;
    Some(Academy::new(Arc::new(SeaOrmAcademyRepository::new(db))))
}

#[tokio::test]
async fn enrollment_round_trip() -> anyhow::Result<()> {
    let Some(academy) = academy().await else { return Ok(()) };
    let c = academy.courses.create(NewCourse { title: "title".into() }).await?;
    let s = academy.students.create(NewStudent { name: "n".into(), email: unique("e") }).await?;

    let view = academy.students.enroll(s.id, c.id).await?;
    assert_eq!(view.courses.len(), 1);
    assert_eq!(view.courses[0].title, "title");

    let course = academy.courses.find_by_id(c.id).await?;
    assert!(course.students.iter().any(|st| st.id == s.id));

    academy.courses.delete_by_id(c.id).await?;
    assert!(academy.students.find_by_id(s.id).await?.courses.is_empty());
    academy.students.delete_by_id(s.id).await?;
    Ok(())
}

#[tokio::test]
async fn links_and_list_views() -> anyhow::Result<()> {
    let Some(academy) = academy().await else { return Ok(()) };
    let t = academy.teachers.create(NewTeacher { name: "name".into() }).await?;
    let c = academy.courses.create(NewCourse { title: "title".into() }).await?;
    let d = academy.departments.create(NewDepartment { name: "dept".into() }).await?;

    let course = academy.courses.link_teacher(c.id, t.id).await?;
    assert_eq!(course.teacher.as_ref().map(|t| t.name.as_str()), Some("name"));
    let dept = academy.departments.link_head(d.id, t.id).await?;
    assert_eq!(dept.head_of_department.map(|h| h.id), Some(t.id));

    let teachers = academy.teachers.find_all().await?;
    let mine = teachers.iter().find(|v| v.id == t.id).expect("teacher listed");
    assert_eq!(mine.department.as_ref().map(|d| d.id), Some(d.id));
    assert_eq!(mine.courses.iter().map(|c| c.id).collect::<Vec<_>>(), vec![c.id]);

    let courses = academy.courses.find_all().await?;
    let listed = courses.iter().find(|v| v.id == c.id).expect("course listed");
    assert_eq!(listed.teacher.as_ref().map(|t| t.id), Some(t.id));

    academy.teachers.delete_by_id(t.id).await?;
    assert!(academy.courses.find_by_id(c.id).await?.teacher.is_none());
    assert!(academy.departments.find_by_id(d.id).await?.head_of_department.is_none());

    academy.courses.delete_by_id(c.id).await?;
    academy.departments.delete_by_id(d.id).await?;
    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_a_store_error() -> anyhow::Result<()> {
    let Some(academy) = academy().await else { return Ok(()) };
    let email = unique("dup");
    let s = academy.students.create(NewStudent { name: "a".into(), email: email.clone() }).await?;
    let err = academy
        .students
        .create(NewStudent { name: "b".into(), email })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Db(_)));
    academy.students.delete_by_id(s.id).await?;
    Ok(())
}

#[tokio::test]
async fn missing_rows_are_not_found() -> anyhow::Result<()> {
    let Some(academy) = academy().await else { return Ok(()) };
    let err = academy.students.update(i64::MAX, StudentPatch::default()).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(academy.courses.link_teacher(i64::MAX, i64::MAX).await.unwrap_err().is_not_found());
    academy.departments.delete_by_id(i64::MAX).await?;
    Ok(())
}
