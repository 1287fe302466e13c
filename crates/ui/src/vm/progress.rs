use course_core::model::Course;

/// Percentage of completed lessons, rounded half up.
///
/// A course without lessons reports 100 once it has been marked completed
/// and 0 before that.
#[must_use]
pub fn progress_percent(course: &Course) -> u8 {
    let total = course.lessons().len();
    if total == 0 {
        return if course.is_completed() { 100 } else { 0 };
    }
    let done = course.completed_lesson_count();
    let rounded = (done * 200 + total) / (total * 2);
    u8::try_from(rounded).unwrap_or(100)
}
