use std::sync::Arc;

use service::{Academy, AcademyRepository};

/// Shared handler state: the academy services over a type-erased repository.
#[derive(Clone)]
pub struct AppState {
    pub academy: Arc<Academy<dyn AcademyRepository>>,
}

impl AppState {
    pub fn new(repo: Arc<dyn AcademyRepository>) -> Self {
        Self { academy: Arc::new(Academy::new(repo)) }
    }
}
