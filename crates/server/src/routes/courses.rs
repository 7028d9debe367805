use axum::{
    extract::{OriginalUri, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use service::domain::{CoursePatch, CourseView, NewCourse};

use crate::errors::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).patch(update).delete(delete_one))
        .route("/:id/teacher/:teacher_id", post(link_teacher))
}

async fn create(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(input): Json<NewCourse>,
) -> Result<(StatusCode, Json<CourseView>), ApiError> {
    let view = state.academy.courses.create(input).await.map_err(ApiError::at(&uri))?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn list(State(state): State<AppState>, OriginalUri(uri): OriginalUri) -> Result<Json<Vec<CourseView>>, ApiError> {
    state.academy.courses.find_all().await.map(Json).map_err(ApiError::at(&uri))
}

async fn get_one(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
) -> Result<Json<CourseView>, ApiError> {
    state.academy.courses.find_by_id(id).await.map(Json).map_err(ApiError::at(&uri))
}

async fn update(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
    Json(patch): Json<CoursePatch>,
) -> Result<Json<CourseView>, ApiError> {
    state.academy.courses.update(id, patch).await.map(Json).map_err(ApiError::at(&uri))
}

async fn delete_one(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.academy.courses.delete_by_id(id).await.map_err(ApiError::at(&uri))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn link_teacher(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path((course_id, teacher_id)): Path<(i64, i64)>,
) -> Result<Json<CourseView>, ApiError> {
    state.academy.courses.link_teacher(course_id, teacher_id).await.map(Json).map_err(ApiError::at(&uri))
}
