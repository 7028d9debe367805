use anyhow::Result;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use uuid::Uuid;

use super::setup_test_db;
use crate::{course, course_student, department, student, teacher};

#[tokio::test]
async fn test_teacher_crud() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let t = teacher::create(&db, "Ada").await?;
    assert!(t.id > 0);

    let mut am: teacher::ActiveModel = t.clone().into();
    am.name = Set("Ada L.".into());
    let updated = am.update(&db).await?;
    assert_eq!(updated.name, "Ada L.");

    teacher::Entity::delete_by_id(t.id).exec(&db).await?;
    assert!(teacher::Entity::find_by_id(t.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_student_email_is_unique() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let email = format!("dup_{}@example.com", Uuid::new_v4());
    let s = student::create(&db, "One", &email).await?;
    let second = student::create(&db, "Two", &email).await;
    assert!(matches!(second, Err(crate::errors::ModelError::Db(_))));

    student::Entity::delete_by_id(s.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_deleting_teacher_clears_foreign_keys() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let t = teacher::create(&db, "Head").await?;
    let c = course::create(&db, "Algebra").await?;
    let d = department::create(&db, "Maths").await?;

    let mut cam: course::ActiveModel = c.clone().into();
    cam.teacher_id = Set(Some(t.id));
    cam.update(&db).await?;
    let mut dam: department::ActiveModel = d.clone().into();
    dam.head_of_department_id = Set(Some(t.id));
    dam.update(&db).await?;

    teacher::Entity::delete_by_id(t.id).exec(&db).await?;

    let c = course::Entity::find_by_id(c.id).one(&db).await?.expect("course survives");
    let d = department::Entity::find_by_id(d.id).one(&db).await?.expect("department survives");
    assert_eq!(c.teacher_id, None);
    assert_eq!(d.head_of_department_id, None);

    course::Entity::delete_by_id(c.id).exec(&db).await?;
    department::Entity::delete_by_id(d.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_duplicate_enrollment_is_accepted() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let c = course::create(&db, "History").await?;
    let s = student::create(&db, "Sam", &format!("sam_{}@example.com", Uuid::new_v4())).await?;
    let first = course_student::insert(&db, c.id, s.id).await?;
    let second = course_student::insert(&db, c.id, s.id).await?;
    assert_ne!(first.id, second.id);

    // join rows go with the course
    course::Entity::delete_by_id(c.id).exec(&db).await?;
    assert!(course_student::Entity::find_by_id(first.id).one(&db).await?.is_none());
    student::Entity::delete_by_id(s.id).exec(&db).await?;
    Ok(())
}
