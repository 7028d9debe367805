use axum::{
    extract::{OriginalUri, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use service::domain::{NewTeacher, TeacherPatch, TeacherView};

use crate::errors::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).patch(update).delete(delete_one))
}

async fn create(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(input): Json<NewTeacher>,
) -> Result<(StatusCode, Json<TeacherView>), ApiError> {
    let view = state.academy.teachers.create(input).await.map_err(ApiError::at(&uri))?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn list(State(state): State<AppState>, OriginalUri(uri): OriginalUri) -> Result<Json<Vec<TeacherView>>, ApiError> {
    state.academy.teachers.find_all().await.map(Json).map_err(ApiError::at(&uri))
}

async fn get_one(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
) -> Result<Json<TeacherView>, ApiError> {
    state.academy.teachers.find_by_id(id).await.map(Json).map_err(ApiError::at(&uri))
}

async fn update(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
    Json(patch): Json<TeacherPatch>,
) -> Result<Json<TeacherView>, ApiError> {
    state.academy.teachers.update(id, patch).await.map(Json).map_err(ApiError::at(&uri))
}

async fn delete_one(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.academy.teachers.delete_by_id(id).await.map_err(ApiError::at(&uri))?;
    Ok(StatusCode::NO_CONTENT)
}
