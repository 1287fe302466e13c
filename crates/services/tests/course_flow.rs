use std::sync::Arc;

use course_core::model::{CourseDraft, CourseId, Lesson, LessonDraft, LessonId};
use services::{CourseService, CourseServiceError};
use storage::repository::Storage;

#[tokio::test]
async fn toggle_all_lessons_then_reset() {
    let storage = Storage::seeded();
    let service = CourseService::new(Arc::clone(&storage.courses));
    let id = CourseId::new(1);

    let course = service
        .toggle_lesson(id, LessonId::new(1))
        .await
        .expect("toggle first lesson");
    assert!(!course.is_completed());
    assert_eq!(course.completed_lesson_count(), 1);

    let mut course = course;
    for lesson in 2..=5 {
        course = service
            .toggle_lesson(id, LessonId::new(lesson))
            .await
            .expect("toggle lesson");
    }
    assert!(course.is_completed());

    let reset = service.reset_course(id).await.expect("reset");
    assert!(!reset.is_completed());
    assert_eq!(reset.completed_lesson_count(), 0);
    assert_eq!(reset.lessons().len(), 5);
}

#[tokio::test]
async fn empty_course_completes_only_explicitly() {
    let storage = Storage::in_memory();
    let service = CourseService::new(Arc::clone(&storage.courses));

    let created = service
        .create_course(CourseDraft::new("X", "Y"))
        .await
        .expect("create");
    assert_eq!(created.id(), CourseId::new(1));

    let err = service
        .toggle_lesson(created.id(), LessonId::new(1))
        .await
        .unwrap_err();
    assert!(matches!(err, CourseServiceError::LessonNotFound { .. }));

    let completed = service.complete_course(created.id()).await.expect("complete");
    assert!(completed.is_completed());
    assert!(completed.lessons().is_empty());
}

#[tokio::test]
async fn created_lessons_keep_order_and_flags() {
    let storage = Storage::in_memory();
    let service = CourseService::new(Arc::clone(&storage.courses));

    let mut done = LessonDraft::new("Second", "b");
    done.completed = Some(serde_json::Value::Bool(true));
    let course = service
        .create_course(
            CourseDraft::new("Ordered", "Lessons in order")
                .with_lessons(vec![LessonDraft::new("First", "a"), done]),
        )
        .await
        .expect("create");

    let titles: Vec<&str> = course.lessons().iter().map(Lesson::title).collect();
    assert_eq!(titles, vec!["First", "Second"]);
    assert!(!course.is_completed());

    // Completing the remaining lesson derives course completion.
    let course = service
        .toggle_lesson(course.id(), LessonId::new(1))
        .await
        .expect("toggle");
    assert!(course.is_completed());
}
