mod course_vm;
mod progress;

pub use course_vm::{CourseCardVm, CourseDetailVm, LessonRowVm, map_course_cards};
pub use progress::progress_percent;
