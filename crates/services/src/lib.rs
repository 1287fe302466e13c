#![forbid(unsafe_code)]

pub mod course_api;
pub mod course_service;
pub mod error;

pub use course_core::Clock;

pub use course_api::{CourseApi, HealthStatus, HttpCourseApi};
pub use course_service::CourseService;
pub use error::{CourseApiError, CourseServiceError};
pub use reqwest::StatusCode;
