use course_core::model::{Course, CourseId, Lesson, LessonId};

use crate::vm::progress::progress_percent;

/// UI-ready representation of a course on the list screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseCardVm {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub lesson_count_label: String,
    pub progress: u8,
    pub badge_label: String,
    pub badge_completed: bool,
}

impl From<&Course> for CourseCardVm {
    fn from(course: &Course) -> Self {
        let progress = progress_percent(course);
        let badge_completed = progress == 100;
        let badge_label = if badge_completed {
            "✓ Completed".to_owned()
        } else {
            format!("{progress}%")
        };
        Self {
            id: course.id(),
            title: course.title().to_owned(),
            description: course.description().to_owned(),
            lesson_count_label: format!("{} Lessons", course.lessons().len()),
            progress,
            badge_label,
            badge_completed,
        }
    }
}

#[must_use]
pub fn map_course_cards(courses: &[Course]) -> Vec<CourseCardVm> {
    courses.iter().map(CourseCardVm::from).collect()
}

/// One checklist row on the detail screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonRowVm {
    pub id: LessonId,
    pub heading: String,
    pub content: String,
    pub checked: bool,
}

impl From<&Lesson> for LessonRowVm {
    fn from(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id(),
            heading: format!("Lesson {}: {}", lesson.id(), lesson.title()),
            content: lesson.content().to_owned(),
            checked: lesson.is_completed(),
        }
    }
}

/// Everything the detail screen renders for one course.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseDetailVm {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub progress: u8,
    pub lessons: Vec<LessonRowVm>,
    pub complete_button_label: &'static str,
    pub complete_button_enabled: bool,
}

impl From<&Course> for CourseDetailVm {
    fn from(course: &Course) -> Self {
        let completed = course.is_completed();
        Self {
            id: course.id(),
            title: course.title().to_owned(),
            description: course.description().to_owned(),
            progress: progress_percent(course),
            lessons: course.lessons().iter().map(LessonRowVm::from).collect(),
            complete_button_label: if completed {
                "✓ Course Completed"
            } else {
                "Mark Course as Completed"
            },
            complete_button_enabled: !completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Course {
        Course::new(
            CourseId::new(2),
            "Web Design Basics",
            "Responsive sites",
            vec![
                Lesson::new(LessonId::new(1), "HTML Structure", "Foundations", true),
                Lesson::new(LessonId::new(2), "CSS Styling", "Looks", false),
            ],
        )
    }

    #[test]
    fn card_shows_percentage_until_complete() {
        let mut course = sample();
        let card = CourseCardVm::from(&course);
        assert_eq!(card.lesson_count_label, "2 Lessons");
        assert_eq!(card.badge_label, "50%");
        assert!(!card.badge_completed);

        course.mark_completed();
        let card = CourseCardVm::from(&course);
        assert_eq!(card.badge_label, "✓ Completed");
        assert!(card.badge_completed);
    }

    #[test]
    fn detail_rows_mirror_lessons() {
        let detail = CourseDetailVm::from(&sample());
        assert_eq!(detail.lessons[0].heading, "Lesson 1: HTML Structure");
        assert!(detail.lessons[0].checked);
        assert!(!detail.lessons[1].checked);
        assert_eq!(detail.complete_button_label, "Mark Course as Completed");
        assert!(detail.complete_button_enabled);
    }
}
