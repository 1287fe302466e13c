mod completion;
mod course;
mod draft;
mod ids;

pub use completion::{derive_course_completion, force_lesson_completion};
pub use course::{Course, CourseError, CourseMutation, Lesson};
pub use draft::{coerce_flag, CourseDraft, CourseValidationError, LessonDraft, ValidatedCourse};
pub use ids::{CourseId, LessonId, ParseIdError};
