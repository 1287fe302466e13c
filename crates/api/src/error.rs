//! Error types for the HTTP handlers.

use axum::Json;
use axum::extract::path::ErrorKind;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use course_core::Envelope;
use course_core::model::CourseValidationError;
use services::CourseServiceError;
use thiserror::Error;
use tracing::{debug, error};

/// Route parameter holding the lesson id in the toggle route.
pub(crate) const LESSON_PARAM: &str = "lesson_id";

/// Errors a handler can return.
///
/// Each maps to a status code and a failure envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The course id is unknown or not a number.
    #[error("course not found")]
    CourseNotFound,

    /// The course exists but the lesson id is unknown or not a number.
    #[error("lesson not found")]
    LessonNotFound,

    /// Required creation fields are missing.
    #[error("title and description are required")]
    MissingFields,

    /// Two lessons in a creation request share an id.
    #[error("lesson ids must be unique")]
    DuplicateLessonId,

    /// The request body could not be decoded.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Internal error (should not occur in normal operation).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    ///
    /// - Course/lesson not found: 404 Not Found
    /// - Missing fields, duplicate lesson ids, invalid body: 400 Bad Request
    /// - Internal: 500 Internal Server Error
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::CourseNotFound | Self::LessonNotFound => StatusCode::NOT_FOUND,
            Self::MissingFields | Self::DuplicateLessonId | Self::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::CourseNotFound => "Course not found".to_owned(),
            Self::LessonNotFound => "Lesson not found".to_owned(),
            Self::MissingFields => "Title and description are required".to_owned(),
            Self::DuplicateLessonId => "Lesson ids must be unique within a course".to_owned(),
            Self::InvalidBody(detail) => format!("Invalid request body: {detail}"),
            Self::Internal(_) => "Internal server error".to_owned(),
        }
    }
}

impl From<CourseServiceError> for ApiError {
    fn from(err: CourseServiceError) -> Self {
        match err {
            CourseServiceError::CourseNotFound(_) => Self::CourseNotFound,
            CourseServiceError::LessonNotFound { .. } => Self::LessonNotFound,
            CourseServiceError::Validation(CourseValidationError::DuplicateLessonId(_)) => {
                Self::DuplicateLessonId
            }
            CourseServiceError::Validation(_) => Self::MissingFields,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

/// A path segment that cannot even be decoded names no course or lesson.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        debug!(%rejection, "undecodable path segment");
        match &rejection {
            PathRejection::FailedToDeserializePathParams(err) => match err.kind() {
                ErrorKind::InvalidUtf8InPathParam { key } if key == LESSON_PARAM => {
                    Self::LessonNotFound
                }
                _ => Self::CourseNotFound,
            },
            _ => Self::CourseNotFound,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Internal details are logged, never sent.
        if let Self::Internal(detail) = &self {
            error!(%detail, "request failed");
        }
        let status = self.status_code();
        (status, Json(Envelope::failure(self.message()))).into_response()
    }
}
