use std::sync::Arc;

use course_core::model::{
    Course, CourseDraft, CourseError, CourseId, CourseMutation, LessonId,
};
use storage::repository::{CourseRepository, StorageError};
use tracing::{debug, info};

use crate::error::CourseServiceError;

/// Orchestrates course lookups and mutations against the store.
#[derive(Clone)]
pub struct CourseService {
    courses: Arc<dyn CourseRepository>,
}

impl CourseService {
    #[must_use]
    pub fn new(courses: Arc<dyn CourseRepository>) -> Self {
        Self { courses }
    }

    /// List every course in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::Storage` if repository access fails.
    pub async fn list_courses(&self) -> Result<Vec<Course>, CourseServiceError> {
        let courses = self.courses.list_courses().await?;
        Ok(courses)
    }

    /// Fetch a course by ID.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::CourseNotFound` if the course does not exist.
    /// Returns `CourseServiceError::Storage` if repository access fails.
    pub async fn get_course(&self, course_id: CourseId) -> Result<Course, CourseServiceError> {
        self.courses
            .get_course(course_id)
            .await?
            .ok_or(CourseServiceError::CourseNotFound(course_id))
    }

    /// Validate a draft and append it as a new, incomplete course.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::Validation` if the title or description is missing.
    /// Returns `CourseServiceError::Storage` if persistence fails.
    pub async fn create_course(&self, draft: CourseDraft) -> Result<Course, CourseServiceError> {
        let validated = draft.validate()?;
        let course = self.courses.insert_new_course(validated).await?;
        info!(
            course_id = %course.id(),
            lessons = course.lessons().len(),
            "course created"
        );
        Ok(course)
    }

    /// Remove a course and return it.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::CourseNotFound` if the course does not exist.
    /// Returns `CourseServiceError::Storage` if repository access fails.
    pub async fn delete_course(&self, course_id: CourseId) -> Result<Course, CourseServiceError> {
        let removed = self
            .courses
            .delete_course(course_id)
            .await?
            .ok_or(CourseServiceError::CourseNotFound(course_id))?;
        info!(course_id = %course_id, "course deleted");
        Ok(removed)
    }

    /// Flip one lesson and recompute the course's completion from its lessons.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::CourseNotFound` or
    /// `CourseServiceError::LessonNotFound` for unknown identifiers.
    pub async fn toggle_lesson(
        &self,
        course_id: CourseId,
        lesson_id: LessonId,
    ) -> Result<Course, CourseServiceError> {
        let course = self
            .mutate(course_id, CourseMutation::ToggleLesson(lesson_id))
            .await?;
        debug!(
            course_id = %course_id,
            lesson_id = %lesson_id,
            course_completed = course.is_completed(),
            "lesson toggled"
        );
        Ok(course)
    }

    /// Mark a course completed, forcing every lesson completed.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::CourseNotFound` if the course does not exist.
    pub async fn complete_course(&self, course_id: CourseId) -> Result<Course, CourseServiceError> {
        let course = self.mutate(course_id, CourseMutation::Complete).await?;
        info!(course_id = %course_id, "course completed");
        Ok(course)
    }

    /// Mark a course incomplete, forcing every lesson incomplete.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::CourseNotFound` if the course does not exist.
    pub async fn reset_course(&self, course_id: CourseId) -> Result<Course, CourseServiceError> {
        let course = self.mutate(course_id, CourseMutation::Reset).await?;
        info!(course_id = %course_id, "course reset");
        Ok(course)
    }

    async fn mutate(
        &self,
        course_id: CourseId,
        mutation: CourseMutation,
    ) -> Result<Course, CourseServiceError> {
        self.courses
            .apply_mutation(course_id, mutation)
            .await
            .map_err(|err| match err {
                StorageError::NotFound => CourseServiceError::CourseNotFound(course_id),
                StorageError::Course(CourseError::LessonNotFound(lesson_id)) => {
                    CourseServiceError::LessonNotFound {
                        course_id,
                        lesson_id,
                    }
                }
                other => other.into(),
            })
    }
}
