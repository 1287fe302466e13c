use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::completion::{derive_course_completion, force_lesson_completion};
use crate::model::ids::{CourseId, LessonId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("lesson {0} not found")]
    LessonNotFound(LessonId),
}

//
// ─── LESSON ────────────────────────────────────────────────────────────────────
//

/// A single unit of content inside a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    id: LessonId,
    title: String,
    content: String,
    completed: bool,
}

impl Lesson {
    #[must_use]
    pub fn new(
        id: LessonId,
        title: impl Into<String>,
        content: impl Into<String>,
        completed: bool,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            completed,
        }
    }

    #[must_use]
    pub fn id(&self) -> LessonId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}

//
// ─── COURSE ────────────────────────────────────────────────────────────────────
//

/// A mutation the store can apply to a course in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseMutation {
    /// Flip one lesson, then recompute the course flag from the lessons.
    ToggleLesson(LessonId),
    /// Mark the course completed and force every lesson completed.
    Complete,
    /// Mark the course incomplete and force every lesson incomplete.
    Reset,
}

/// A course with its ordered lessons.
///
/// `completed` is stored rather than computed on read: a course without
/// lessons can still be marked completed explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    id: CourseId,
    title: String,
    description: String,
    lessons: Vec<Lesson>,
    completed: bool,
}

impl Course {
    /// Creates a course. New courses always start incomplete, whatever
    /// state the supplied lessons carry.
    #[must_use]
    pub fn new(
        id: CourseId,
        title: impl Into<String>,
        description: impl Into<String>,
        lessons: Vec<Lesson>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            lessons,
            completed: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> CourseId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn completed_lesson_count(&self) -> usize {
        self.lessons.iter().filter(|l| l.completed).count()
    }

    /// Flip a lesson's completion and recompute the course flag.
    ///
    /// Returns the lesson's new state.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::LessonNotFound` if no lesson has `lesson_id`;
    /// the course is left untouched.
    pub fn toggle_lesson(&mut self, lesson_id: LessonId) -> Result<bool, CourseError> {
        let lesson = self
            .lessons
            .iter_mut()
            .find(|l| l.id == lesson_id)
            .ok_or(CourseError::LessonNotFound(lesson_id))?;
        lesson.completed = !lesson.completed;
        let now_completed = lesson.completed;

        self.completed = derive_course_completion(&self.lessons);
        Ok(now_completed)
    }

    /// Mark the course completed and force every lesson completed.
    pub fn mark_completed(&mut self) {
        self.completed = true;
        force_lesson_completion(&mut self.lessons, true);
    }

    /// Mark the course incomplete and force every lesson incomplete.
    pub fn reset(&mut self) {
        self.completed = false;
        force_lesson_completion(&mut self.lessons, false);
    }

    /// Apply a mutation in place.
    ///
    /// # Errors
    ///
    /// Propagates `CourseError` from [`Course::toggle_lesson`].
    pub fn apply(&mut self, mutation: CourseMutation) -> Result<(), CourseError> {
        match mutation {
            CourseMutation::ToggleLesson(lesson_id) => {
                self.toggle_lesson(lesson_id)?;
            }
            CourseMutation::Complete => self.mark_completed(),
            CourseMutation::Reset => self.reset(),
        }
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
