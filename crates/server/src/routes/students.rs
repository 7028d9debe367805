use axum::{
    extract::{OriginalUri, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use service::domain::{CourseView, NewStudent, StudentPatch, StudentView};

use crate::errors::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).patch(update).delete(delete_one))
        .route("/:id/courses", get(courses))
        .route("/:id/courses/:course_id", post(enroll))
}

async fn create(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(input): Json<NewStudent>,
) -> Result<(StatusCode, Json<StudentView>), ApiError> {
    let view = state.academy.students.create(input).await.map_err(ApiError::at(&uri))?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn list(State(state): State<AppState>, OriginalUri(uri): OriginalUri) -> Result<Json<Vec<StudentView>>, ApiError> {
    state.academy.students.find_all().await.map(Json).map_err(ApiError::at(&uri))
}

async fn get_one(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
) -> Result<Json<StudentView>, ApiError> {
    state.academy.students.find_by_id(id).await.map(Json).map_err(ApiError::at(&uri))
}

/// Courses of the student with their teachers.
async fn courses(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
) -> Result<Json<Vec<CourseView>>, ApiError> {
    state.academy.students.find_courses(id).await.map(Json).map_err(ApiError::at(&uri))
}

async fn update(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
    Json(patch): Json<StudentPatch>,
) -> Result<Json<StudentView>, ApiError> {
    state.academy.students.update(id, patch).await.map(Json).map_err(ApiError::at(&uri))
}

async fn delete_one(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.academy.students.delete_by_id(id).await.map_err(ApiError::at(&uri))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn enroll(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path((student_id, course_id)): Path<(i64, i64)>,
) -> Result<Json<StudentView>, ApiError> {
    state.academy.students.enroll(student_id, course_id).await.map(Json).map_err(ApiError::at(&uri))
}
