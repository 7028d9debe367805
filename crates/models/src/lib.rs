//! sea-orm entities for the academy schema, the flat join rows used by batch
//! relation queries, and connection helpers.

pub mod errors;
pub mod db;
pub mod teacher;
pub mod department;
pub mod course;
pub mod student;
pub mod course_student;
pub mod views;

#[cfg(test)]
mod tests;
