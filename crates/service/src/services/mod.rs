pub mod course_service;
pub mod department_service;
pub mod student_service;
pub mod teacher_service;

pub use course_service::CourseService;
pub use department_service::DepartmentService;
pub use student_service::StudentService;
pub use teacher_service::TeacherService;
