//! Shared error types for the services crate.

use thiserror::Error;

use course_core::model::{CourseId, CourseValidationError, LessonId};
use storage::repository::StorageError;

/// Errors emitted by `CourseService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CourseServiceError {
    #[error("course {0} not found")]
    CourseNotFound(CourseId),
    #[error("lesson {lesson_id} not found in course {course_id}")]
    LessonNotFound {
        course_id: CourseId,
        lesson_id: LessonId,
    },
    #[error(transparent)]
    Validation(#[from] CourseValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl CourseServiceError {
    /// True for the course and lesson lookup failures.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CourseNotFound(_) | Self::LessonNotFound { .. })
    }
}

/// Errors emitted by `HttpCourseApi`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CourseApiError {
    #[error("course api rejected the request ({status}): {message}")]
    Rejected {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("course api request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("course api response carried no data")]
    MissingData,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl CourseApiError {
    /// HTTP status of a rejected request, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Rejected { status, .. } | Self::HttpStatus(status) => Some(*status),
            Self::MissingData => None,
            Self::Http(err) => err.status(),
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(reqwest::StatusCode::NOT_FOUND)
    }
}
