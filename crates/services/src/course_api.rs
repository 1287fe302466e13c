//! Client side of the course HTTP API.

use async_trait::async_trait;
use course_core::Envelope;
use course_core::model::{Course, CourseDraft, CourseId, LessonId};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::CourseApiError;

/// Result of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub message: String,
    pub timestamp: String,
}

/// Remote course operations as seen by a client.
///
/// Every mutating call returns the server's post-mutation course.
#[async_trait]
pub trait CourseApi: Send + Sync {
    async fn list_courses(&self) -> Result<Vec<Course>, CourseApiError>;
    async fn get_course(&self, course_id: CourseId) -> Result<Course, CourseApiError>;
    async fn create_course(&self, draft: &CourseDraft) -> Result<Course, CourseApiError>;
    async fn delete_course(&self, course_id: CourseId) -> Result<Course, CourseApiError>;
    async fn toggle_lesson(
        &self,
        course_id: CourseId,
        lesson_id: LessonId,
    ) -> Result<Course, CourseApiError>;
    async fn complete_course(&self, course_id: CourseId) -> Result<Course, CourseApiError>;
    async fn reset_course(&self, course_id: CourseId) -> Result<Course, CourseApiError>;
}

/// `CourseApi` over HTTP+JSON using `reqwest`.
#[derive(Clone)]
pub struct HttpCourseApi {
    client: Client,
    base_url: String,
}

impl HttpCourseApi {
    /// `base_url` is the server origin, e.g. `http://127.0.0.1:3000`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url)
    }

    /// Check that the server is up.
    ///
    /// # Errors
    ///
    /// Returns `CourseApiError` if the request fails or the server reports failure.
    pub async fn health(&self) -> Result<HealthStatus, CourseApiError> {
        let envelope: Envelope<serde_json::Value> =
            send_envelope(self.client.get(self.url("/health"))).await?;
        Ok(HealthStatus {
            message: envelope.message.unwrap_or_default(),
            timestamp: envelope.timestamp.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl CourseApi for HttpCourseApi {
    async fn list_courses(&self) -> Result<Vec<Course>, CourseApiError> {
        send(self.client.get(self.url("/courses"))).await
    }

    async fn get_course(&self, course_id: CourseId) -> Result<Course, CourseApiError> {
        send(self.client.get(self.url(&format!("/courses/{course_id}")))).await
    }

    async fn create_course(&self, draft: &CourseDraft) -> Result<Course, CourseApiError> {
        send(self.client.post(self.url("/courses")).json(draft)).await
    }

    async fn delete_course(&self, course_id: CourseId) -> Result<Course, CourseApiError> {
        send(self.client.delete(self.url(&format!("/courses/{course_id}")))).await
    }

    async fn toggle_lesson(
        &self,
        course_id: CourseId,
        lesson_id: LessonId,
    ) -> Result<Course, CourseApiError> {
        let path = format!("/courses/{course_id}/lessons/{lesson_id}/toggle");
        send(self.client.put(self.url(&path))).await
    }

    async fn complete_course(&self, course_id: CourseId) -> Result<Course, CourseApiError> {
        send(self.client.put(self.url(&format!("/courses/{course_id}/complete")))).await
    }

    async fn reset_course(&self, course_id: CourseId) -> Result<Course, CourseApiError> {
        send(self.client.put(self.url(&format!("/courses/{course_id}/reset")))).await
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, CourseApiError> {
    let envelope: Envelope<T> = send_envelope(request).await?;
    envelope.data.ok_or(CourseApiError::MissingData)
}

async fn send_envelope<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<Envelope<T>, CourseApiError> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        // Error bodies are envelopes too, but fall back to the bare status if not.
        let message = response
            .json::<Envelope<serde_json::Value>>()
            .await
            .ok()
            .and_then(|envelope| envelope.message);
        debug!(%status, ?message, "course api request rejected");
        return Err(match message {
            Some(message) => CourseApiError::Rejected { status, message },
            None => CourseApiError::HttpStatus(status),
        });
    }

    let envelope: Envelope<T> = response.json().await?;
    if !envelope.success {
        return Err(CourseApiError::Rejected {
            status,
            message: envelope.message.unwrap_or_default(),
        });
    }
    Ok(envelope)
}
