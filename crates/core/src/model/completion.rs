//! Completion rules between a course and its lessons.
//!
//! Completion flows in two directions and each direction has its own entry
//! point:
//!
//! - lesson → course: after a single lesson changes, the course flag is
//!   recomputed from the lessons ([`derive_course_completion`]).
//! - course → lesson: an explicit complete/reset sets the course flag and
//!   overwrites every lesson with it ([`force_lesson_completion`]).
//!
//! Keep them separate. A course with zero lessons can only become completed
//! through the second path.

use crate::model::course::Lesson;

/// Course completion implied by its lessons.
///
/// Returns `false` for an empty lesson list.
#[must_use]
pub fn derive_course_completion(lessons: &[Lesson]) -> bool {
    !lessons.is_empty() && lessons.iter().all(Lesson::is_completed)
}

/// Overwrite every lesson's completion flag with `completed`.
pub fn force_lesson_completion(lessons: &mut [Lesson], completed: bool) {
    for lesson in lessons {
        lesson.set_completed(completed);
    }
}
