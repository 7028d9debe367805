use axum::{
    extract::{OriginalUri, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use service::domain::{DepartmentPatch, DepartmentView, NewDepartment};

use crate::errors::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).patch(update).delete(delete_one))
        .route("/:id/teacher/:teacher_id", post(link_head))
}

async fn create(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(input): Json<NewDepartment>,
) -> Result<(StatusCode, Json<DepartmentView>), ApiError> {
    let view = state.academy.departments.create(input).await.map_err(ApiError::at(&uri))?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn list(State(state): State<AppState>, OriginalUri(uri): OriginalUri) -> Result<Json<Vec<DepartmentView>>, ApiError> {
    state.academy.departments.find_all().await.map(Json).map_err(ApiError::at(&uri))
}

async fn get_one(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
) -> Result<Json<DepartmentView>, ApiError> {
    state.academy.departments.find_by_id(id).await.map(Json).map_err(ApiError::at(&uri))
}

async fn update(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
    Json(patch): Json<DepartmentPatch>,
) -> Result<Json<DepartmentView>, ApiError> {
    state.academy.departments.update(id, patch).await.map(Json).map_err(ApiError::at(&uri))
}

async fn delete_one(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.academy.departments.delete_by_id(id).await.map_err(ApiError::at(&uri))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Make the teacher head of the department.
async fn link_head(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path((department_id, teacher_id)): Path<(i64, i64)>,
) -> Result<Json<DepartmentView>, ApiError> {
    state.academy.departments.link_head(department_id, teacher_id).await.map(Json).map_err(ApiError::at(&uri))
}
