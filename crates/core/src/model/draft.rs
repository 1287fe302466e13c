use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::model::course::{Course, Lesson};
use crate::model::ids::{CourseId, LessonId};

//
// ─── DRAFT TYPES ───────────────────────────────────────────────────────────────
//

/// Client-supplied shape for a new course.
///
/// Every field is optional on the wire so that a missing title surfaces as a
/// validation error rather than a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lessons: Option<Vec<LessonDraft>>,
}

/// Client-supplied shape for a lesson inside a [`CourseDraft`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LessonDraft {
    /// Zero or absent means "use position + 1".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Any JSON value; coerced with [`coerce_flag`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<Value>,
}

impl CourseDraft {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            lessons: None,
        }
    }

    #[must_use]
    pub fn with_lessons(mut self, lessons: Vec<LessonDraft>) -> Self {
        self.lessons = Some(lessons);
        self
    }

    /// Check required fields and normalize lessons.
    ///
    /// # Errors
    ///
    /// Returns `CourseValidationError` if the title or description is absent
    /// or empty, or if two lessons end up with the same id.
    pub fn validate(self) -> Result<ValidatedCourse, CourseValidationError> {
        let title = required(self.title).ok_or(CourseValidationError::MissingTitle)?;
        let description =
            required(self.description).ok_or(CourseValidationError::MissingDescription)?;

        let lessons: Vec<Lesson> = self
            .lessons
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(idx, draft)| draft.into_lesson(idx))
            .collect();

        let mut seen = HashSet::with_capacity(lessons.len());
        if let Some(dup) = lessons.iter().find(|l| !seen.insert(l.id())) {
            return Err(CourseValidationError::DuplicateLessonId(dup.id()));
        }

        Ok(ValidatedCourse {
            title,
            description,
            lessons,
        })
    }
}

impl LessonDraft {
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            title: Some(title.into()),
            content: Some(content.into()),
            completed: None,
        }
    }

    fn into_lesson(self, position: usize) -> Lesson {
        let id = match self.id {
            Some(id) if id != 0 => id,
            _ => position as u64 + 1,
        };
        let completed = self.completed.as_ref().is_some_and(coerce_flag);
        Lesson::new(
            LessonId::new(id),
            self.title.unwrap_or_default(),
            self.content.unwrap_or_default(),
            completed,
        )
    }
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Truthiness coercion for loosely typed flags.
///
/// `null`, `false`, `0`, `NaN`, and `""` are false; everything else
/// (including empty arrays and objects) is true.
#[must_use]
pub fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

//
// ─── VALIDATED ─────────────────────────────────────────────────────────────────
//

/// A course that passed validation and is waiting for an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCourse {
    pub title: String,
    pub description: String,
    pub lessons: Vec<Lesson>,
}

impl ValidatedCourse {
    #[must_use]
    pub fn assign_id(self, id: CourseId) -> Course {
        Course::new(id, self.title, self.description, self.lessons)
    }
}

//
// ─── VALIDATION ERRORS ─────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseValidationError {
    #[error("course title is required")]
    MissingTitle,

    #[error("course description is required")]
    MissingDescription,

    #[error("lesson id {0} appears more than once")]
    DuplicateLessonId(LessonId),
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_title_is_rejected() {
        let err = CourseDraft::new("", "desc").validate().unwrap_err();
        assert_eq!(err, CourseValidationError::MissingTitle);

    }

    #[test]
    fn whitespace_title_is_kept_verbatim() {
        let validated = CourseDraft::new("   ", " d ").validate().unwrap();
        assert_eq!(validated.title, "   ");
        assert_eq!(validated.description, " d ");
    }

    #[test]
    fn missing_description_is_rejected() {
        let draft: CourseDraft = serde_json::from_value(json!({ "title": "X" })).unwrap();
        assert_eq!(
            draft.validate().unwrap_err(),
            CourseValidationError::MissingDescription
        );
    }

    #[test]
    fn no_lessons_yields_empty_incomplete_course() {
        let course = CourseDraft::new("X", "Y")
            .validate()
            .unwrap()
            .assign_id(CourseId::new(5));
        assert_eq!(course.id(), CourseId::new(5));
        assert!(course.lessons().is_empty());
        assert!(!course.is_completed());
    }

    #[test]
    fn lesson_ids_default_to_position() {
        let draft: CourseDraft = serde_json::from_value(json!({
            "title": "X",
            "description": "Y",
            "lessons": [
                { "title": "a" },
                { "id": 0, "title": "b" },
                { "id": 10, "title": "c" }
            ]
        }))
        .unwrap();
        let validated = draft.validate().unwrap();
        let ids: Vec<u64> = validated.lessons.iter().map(|l| l.id().value()).collect();
        assert_eq!(ids, vec![1, 2, 10]);
        assert_eq!(validated.lessons[0].content(), "");
    }

    #[test]
    fn colliding_lesson_ids_are_rejected() {
        let draft: CourseDraft = serde_json::from_value(json!({
            "title": "X",
            "description": "Y",
            "lessons": [
                { "title": "a" },
                { "id": 1, "title": "b" }
            ]
        }))
        .unwrap();
        assert_eq!(
            draft.validate().unwrap_err(),
            CourseValidationError::DuplicateLessonId(LessonId::new(1))
        );

        let draft: CourseDraft = serde_json::from_value(json!({
            "title": "X",
            "description": "Y",
            "lessons": [{ "id": 4, "title": "a" }, { "id": 4, "title": "b" }]
        }))
        .unwrap();
        assert!(matches!(
            draft.validate(),
            Err(CourseValidationError::DuplicateLessonId(_))
        ));
    }

    #[test]
    fn completed_flags_are_coerced_but_course_starts_incomplete() {
        let draft: CourseDraft = serde_json::from_value(json!({
            "title": "X",
            "description": "Y",
            "lessons": [
                { "title": "a", "completed": "yes" },
                { "title": "b", "completed": 0 },
                { "title": "c", "completed": 1 },
                { "title": "d", "completed": null }
            ]
        }))
        .unwrap();
        let course = draft.validate().unwrap().assign_id(CourseId::new(1));
        let flags: Vec<bool> = course.lessons().iter().map(Lesson::is_completed).collect();
        assert_eq!(flags, vec![true, false, true, false]);
        assert!(!course.is_completed());
    }

    #[test]
    fn null_lessons_is_treated_as_empty() {
        let draft: CourseDraft =
            serde_json::from_value(json!({ "title": "X", "description": "Y", "lessons": null }))
                .unwrap();
        assert!(draft.validate().unwrap().lessons.is_empty());
    }

    #[test]
    fn coerce_flag_follows_truthiness() {
        assert!(!coerce_flag(&json!(false)));
        assert!(!coerce_flag(&json!("")));
        assert!(!coerce_flag(&json!(0.0)));
        assert!(coerce_flag(&json!("false")));
        assert!(coerce_flag(&json!([])));
        assert!(coerce_flag(&json!({})));
        assert!(coerce_flag(&json!(-3)));
    }
}
