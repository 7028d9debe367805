//! Pure conversions between stored models, flat join rows and views.
//!
//! Nothing here touches the store. Nested views are shallow: their own
//! relation fields are set to the empty value explicitly.

use models::views::{CourseStudentRow, CourseTeacherRow, StudentCourseRow};
use models::{course, department, student, teacher};

use crate::domain::{
    CoursePatch, CourseView, DepartmentPatch, DepartmentView, StudentPatch, StudentView, TeacherPatch, TeacherView,
};

pub fn student_summary(s: &student::Model) -> StudentView {
    StudentView { id: s.id, name: s.name.clone(), email: s.email.clone(), courses: Vec::new() }
}

pub fn student_view(s: &student::Model, courses: Vec<CourseView>) -> StudentView {
    StudentView { courses, ..student_summary(s) }
}

pub fn student_from_row(row: &CourseStudentRow) -> StudentView {
    StudentView {
        id: row.student_id,
        name: row.student_name.clone(),
        email: row.student_email.clone(),
        courses: Vec::new(),
    }
}

pub fn teacher_summary(t: &teacher::Model) -> TeacherView {
    TeacherView { id: t.id, name: t.name.clone(), department: None, courses: Vec::new() }
}

pub fn teacher_from_row(row: &CourseTeacherRow) -> TeacherView {
    TeacherView { id: row.teacher_id, name: row.teacher_name.clone(), department: None, courses: Vec::new() }
}

pub fn teacher_view(t: &teacher::Model, department: Option<&department::Model>, courses: &[course::Model]) -> TeacherView {
    TeacherView {
        department: department.map(department_summary),
        courses: courses.iter().map(course_summary).collect(),
        ..teacher_summary(t)
    }
}

pub fn course_summary(c: &course::Model) -> CourseView {
    CourseView { id: c.id, title: c.title.clone(), teacher: None, students: Vec::new() }
}

pub fn course_view(c: &course::Model, teacher: Option<TeacherView>, students: Vec<StudentView>) -> CourseView {
    CourseView { teacher, students, ..course_summary(c) }
}

/// Course entry inside a student's view: carries its teacher, no students.
pub fn enrolled_course(c: &course::Model, teacher: Option<&teacher::Model>) -> CourseView {
    course_view(c, teacher.map(teacher_summary), Vec::new())
}

pub fn course_from_row(row: &StudentCourseRow) -> course::Model {
    course::Model { id: row.course_id, title: row.course_title.clone(), teacher_id: row.course_teacher_id }
}

pub fn department_summary(d: &department::Model) -> DepartmentView {
    DepartmentView { id: d.id, name: d.name.clone(), head_of_department: None }
}

pub fn department_view(d: &department::Model, head: Option<&teacher::Model>) -> DepartmentView {
    DepartmentView { head_of_department: head.map(|t| Box::new(teacher_summary(t))), ..department_summary(d) }
}

fn non_blank(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.trim().is_empty())
}

/// Copy supplied fields onto the stored model. Returns whether anything changed.
pub fn apply_student_patch(s: &mut student::Model, patch: &StudentPatch) -> bool {
    let mut changed = false;
    if let Some(name) = non_blank(&patch.name) {
        changed |= s.name != name;
        s.name = name.to_string();
    }
    if let Some(email) = non_blank(&patch.email) {
        changed |= s.email != email;
        s.email = email.to_string();
    }
    changed
}

pub fn apply_teacher_patch(t: &mut teacher::Model, patch: &TeacherPatch) -> bool {
    match non_blank(&patch.name) {
        Some(name) if t.name != name => {
            t.name = name.to_string();
            true
        }
        _ => false,
    }
}

pub fn apply_course_patch(c: &mut course::Model, patch: &CoursePatch) -> bool {
    match non_blank(&patch.title) {
        Some(title) if c.title != title => {
            c.title = title.to_string();
            true
        }
        _ => false,
    }
}

pub fn apply_department_patch(d: &mut department::Model, patch: &DepartmentPatch) -> bool {
    match non_blank(&patch.name) {
        Some(name) if d.name != name => {
            d.name = name.to_string();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> student::Model {
        student::Model { id: 1, name: "n".into(), email: "e".into() }
    }

    #[test]
    fn patch_leaves_omitted_fields_untouched() {
        let mut s = student();
        let changed = apply_student_patch(&mut s, &StudentPatch { name: Some("m".into()), email: None });
        assert!(changed);
        assert_eq!(s.name, "m");
        assert_eq!(s.email, "e");
    }

    #[test]
    fn blank_patch_values_are_ignored() {
        let mut s = student();
        let changed = apply_student_patch(&mut s, &StudentPatch { name: Some("   ".into()), email: Some(String::new()) });
        assert!(!changed);
        assert_eq!(s, student());
    }

    #[test]
    fn summaries_set_relations_to_empty() {
        let c = course::Model { id: 3, title: "t".into(), teacher_id: Some(9) };
        let v = course_summary(&c);
        assert!(v.teacher.is_none());
        assert!(v.students.is_empty());
    }

    #[test]
    fn row_round_trips_into_course_model() {
        let row = StudentCourseRow { student_id: 1, course_id: 2, course_title: "t".into(), course_teacher_id: None };
        assert_eq!(course_from_row(&row), course::Model { id: 2, title: "t".into(), teacher_id: None });
    }

    #[test]
    fn department_view_carries_head() {
        let d = department::Model { id: 1, name: "Maths".into(), head_of_department_id: Some(5) };
        let t = teacher::Model { id: 5, name: "Head".into() };
        let v = department_view(&d, Some(&t));
        assert_eq!(v.head_of_department.map(|h| h.name), Some("Head".to_string()));
    }

    #[test]
    fn teacher_and_department_views_nest() {
        let t = teacher::Model { id: 5, name: "Head".into() };
        let d = department::Model { id: 1, name: "Maths".into(), head_of_department_id: Some(5) };
        let mut tv = teacher_view(&t, Some(&d), &[]);
        tv.department = Some(department_view(&d, Some(&t)));
        let head = tv.department.as_ref().and_then(|d| d.head_of_department.as_deref());
        assert_eq!(head.map(|h| h.id), Some(5));
        assert!(head.is_some_and(|h| h.department.is_none()));
    }
}
