use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use course_core::Envelope;
use course_core::model::{Course, CourseDraft, CourseId, LessonId};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;
type RawPath<T> = Result<Path<T>, PathRejection>;

/// Path segments that are not non-negative integers never match a course.
fn parse_course_id(raw: &str) -> Result<CourseId, ApiError> {
    raw.parse().map_err(|_| {
        debug!(raw, "non-numeric course id");
        ApiError::CourseNotFound
    })
}

pub async fn list_courses(State(state): State<AppState>) -> ApiResult<Vec<Course>> {
    let courses = state.courses.list_courses().await?;
    Ok(Json(Envelope::ok(courses)))
}

pub async fn get_course(
    State(state): State<AppState>,
    course_id: RawPath<String>,
) -> ApiResult<Course> {
    let Path(course_id) = course_id?;
    let course_id = parse_course_id(&course_id)?;
    let course = state.courses.get_course(course_id).await?;
    Ok(Json(Envelope::ok(course)))
}

pub async fn create_course(
    State(state): State<AppState>,
    payload: Result<Json<CourseDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Course>>), ApiError> {
    let Json(draft) = payload?;
    let course = state.courses.create_course(draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok(course).with_message("Course created successfully")),
    ))
}

pub async fn delete_course(
    State(state): State<AppState>,
    course_id: RawPath<String>,
) -> ApiResult<Course> {
    let Path(course_id) = course_id?;
    let course_id = parse_course_id(&course_id)?;
    let removed = state.courses.delete_course(course_id).await?;
    Ok(Json(
        Envelope::ok(removed).with_message("Course deleted successfully"),
    ))
}

pub async fn complete_course(
    State(state): State<AppState>,
    course_id: RawPath<String>,
) -> ApiResult<Course> {
    let Path(course_id) = course_id?;
    let course_id = parse_course_id(&course_id)?;
    let course = state.courses.complete_course(course_id).await?;
    Ok(Json(
        Envelope::ok(course).with_message("Course marked as completed"),
    ))
}

pub async fn reset_course(
    State(state): State<AppState>,
    course_id: RawPath<String>,
) -> ApiResult<Course> {
    let Path(course_id) = course_id?;
    let course_id = parse_course_id(&course_id)?;
    let course = state.courses.reset_course(course_id).await?;
    Ok(Json(
        Envelope::ok(course).with_message("Course reset to not completed"),
    ))
}

pub async fn toggle_lesson(
    State(state): State<AppState>,
    ids: RawPath<(String, String)>,
) -> ApiResult<Course> {
    let Path((course_id, lesson_id)) = ids?;
    let course_id = parse_course_id(&course_id)?;
    let Ok(lesson_id) = lesson_id.parse::<LessonId>() else {
        // An unknown course still wins over a malformed lesson id.
        state.courses.get_course(course_id).await?;
        return Err(ApiError::LessonNotFound);
    };
    let course = state.courses.toggle_lesson(course_id, lesson_id).await?;
    Ok(Json(Envelope::ok(course).with_message("Lesson toggled")))
}

pub async fn health(State(state): State<AppState>) -> Json<Envelope<()>> {
    Json(Envelope::status("Server is running", state.clock.timestamp()))
}
