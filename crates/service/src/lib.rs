//! Relation aggregation and cross-entity consistency for academy records.
//! - Composite views of one entity are fetched concurrently (`compose`).
//! - List views batch every relation kind into one query (`batch`).
//! - Links are written only after both ends exist (`mutation`).
//! - Store errors pass through; absent rows become `NotFound` (`errors`).

pub mod academy;
pub mod batch;
pub mod compose;
pub mod domain;
pub mod errors;
pub mod mapper;
pub mod mutation;
pub mod repo;
pub mod repository;
pub mod services;
#[cfg(test)]
pub mod test_support;
#[cfg(test)]
mod db_tests;

pub use academy::Academy;
pub use errors::ServiceError;
pub use repository::AcademyRepository;
