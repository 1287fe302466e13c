use std::sync::Arc;

use course_core::model::{Course, CourseId, LessonId};
use services::{CourseApi, CourseApiError};
use thiserror::Error;
use tracing::{debug, warn};

use crate::views::Screen;
use crate::vm::{CourseCardVm, CourseDetailVm, map_course_cards};

/// Shown after the current course is completed from the detail screen.
pub const COMPLETED_MESSAGE: &str = "🎉 Congratulations! You completed this course!";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MirrorError {
    #[error("no course is selected")]
    NoCourseSelected,
    #[error(transparent)]
    Api(#[from] CourseApiError),
}

/// Client replica of the server's course collection.
///
/// The replica has no write authority: every change is a server call whose
/// returned course replaces the local copy. Nothing is updated optimistically,
/// so a failed call leaves the last known good state in place.
pub struct CourseMirror {
    api: Arc<dyn CourseApi>,
    courses: Vec<Course>,
    screen: Screen,
    status_message: Option<String>,
}

impl CourseMirror {
    #[must_use]
    pub fn new(api: Arc<dyn CourseApi>) -> Self {
        Self {
            api,
            courses: Vec::new(),
            screen: Screen::List,
            status_message: None,
        }
    }

    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    #[must_use]
    pub fn course(&self, course_id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| c.id() == course_id)
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// The course on the detail screen, if one is shown.
    #[must_use]
    pub fn current_course(&self) -> Option<&Course> {
        self.screen.course_id().and_then(|id| self.course(id))
    }

    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Replace the replica with the server's full collection.
    ///
    /// # Errors
    ///
    /// Returns the API error after logging it; the replica is left untouched.
    pub async fn refresh(&mut self) -> Result<(), MirrorError> {
        match self.api.list_courses().await {
            Ok(courses) => {
                debug!(count = courses.len(), "course replica refreshed");
                self.courses = courses;
                let current = self.screen.course_id();
                if current.is_some_and(|id| self.course(id).is_none()) {
                    self.screen = Screen::List;
                }
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to refresh courses");
                Err(err.into())
            }
        }
    }

    /// Replace the local copy of `course` wholesale.
    ///
    /// Returns `false` if no local entry has the same id.
    pub fn apply_update(&mut self, course: Course) -> bool {
        match self.courses.iter_mut().find(|c| c.id() == course.id()) {
            Some(slot) => {
                *slot = course;
                true
            }
            None => {
                debug!(course_id = %course.id(), "update for unknown course ignored");
                false
            }
        }
    }

    /// Switch to the detail screen for `course_id`.
    ///
    /// Returns `false` and stays put if the id is not in the replica.
    pub fn select_course(&mut self, course_id: CourseId) -> bool {
        if self.course(course_id).is_none() {
            return false;
        }
        self.screen = Screen::Detail(course_id);
        self.status_message = None;
        true
    }

    /// Return to the list screen.
    pub fn show_list(&mut self) {
        self.screen = Screen::List;
    }

    /// Toggle a lesson of the current course.
    ///
    /// # Errors
    ///
    /// Returns `MirrorError::NoCourseSelected` on the list screen, or the API
    /// error (logged) if the call fails.
    pub async fn toggle_lesson(&mut self, lesson_id: LessonId) -> Result<(), MirrorError> {
        let course_id = self.current_id()?;
        let result = self.api.toggle_lesson(course_id, lesson_id).await;
        self.settle(course_id, result)?;
        Ok(())
    }

    /// Complete the current course.
    ///
    /// Does nothing when the course is already completed.
    ///
    /// # Errors
    ///
    /// Returns `MirrorError::NoCourseSelected` on the list screen, or the API
    /// error (logged) if the call fails.
    pub async fn complete_current(&mut self) -> Result<(), MirrorError> {
        let course_id = self.current_id()?;
        if self.course(course_id).is_some_and(Course::is_completed) {
            return Ok(());
        }
        let result = self.api.complete_course(course_id).await;
        self.settle(course_id, result)?;
        self.status_message = Some(COMPLETED_MESSAGE.to_owned());
        Ok(())
    }

    /// Reset the current course.
    ///
    /// # Errors
    ///
    /// Returns `MirrorError::NoCourseSelected` on the list screen, or the API
    /// error (logged) if the call fails.
    pub async fn reset_current(&mut self) -> Result<(), MirrorError> {
        let course_id = self.current_id()?;
        let result = self.api.reset_course(course_id).await;
        self.settle(course_id, result)?;
        self.status_message = None;
        Ok(())
    }

    #[must_use]
    pub fn course_cards(&self) -> Vec<CourseCardVm> {
        map_course_cards(&self.courses)
    }

    #[must_use]
    pub fn detail(&self) -> Option<CourseDetailVm> {
        self.current_course().map(CourseDetailVm::from)
    }

    fn current_id(&self) -> Result<CourseId, MirrorError> {
        self.screen.course_id().ok_or(MirrorError::NoCourseSelected)
    }

    fn settle(
        &mut self,
        course_id: CourseId,
        result: Result<Course, CourseApiError>,
    ) -> Result<(), MirrorError> {
        match result {
            Ok(course) => {
                self.apply_update(course);
                Ok(())
            }
            Err(err) => {
                warn!(course_id = %course_id, error = %err, "course update failed");
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use course_core::model::CourseDraft;
    use services::{CourseService, CourseServiceError, StatusCode};
    use storage::repository::InMemoryRepository;

    use crate::vm::progress_percent;

    /// Answers from an in-process store. When offline, responses are dropped
    /// after the store has handled the call.
    struct LocalApi {
        service: CourseService,
        offline: AtomicBool,
    }

    impl LocalApi {
        fn seeded() -> Arc<Self> {
            Arc::new(Self {
                service: CourseService::new(Arc::new(InMemoryRepository::seeded())),
                offline: AtomicBool::new(false),
            })
        }

        fn set_offline(&self, offline: bool) {
            self.offline.store(offline, Ordering::SeqCst);
        }

        fn answer<T>(&self, result: Result<T, CourseServiceError>) -> Result<T, CourseApiError> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(CourseApiError::HttpStatus(StatusCode::SERVICE_UNAVAILABLE));
            }
            result.map_err(|err| CourseApiError::Rejected {
                status: if err.is_not_found() {
                    StatusCode::NOT_FOUND
                } else {
                    StatusCode::BAD_REQUEST
                },
                message: err.to_string(),
            })
        }
    }

    #[async_trait]
    impl CourseApi for LocalApi {
        async fn list_courses(&self) -> Result<Vec<Course>, CourseApiError> {
            self.answer(self.service.list_courses().await)
        }

        async fn get_course(&self, course_id: CourseId) -> Result<Course, CourseApiError> {
            self.answer(self.service.get_course(course_id).await)
        }

        async fn create_course(&self, draft: &CourseDraft) -> Result<Course, CourseApiError> {
            self.answer(self.service.create_course(draft.clone()).await)
        }

        async fn delete_course(&self, course_id: CourseId) -> Result<Course, CourseApiError> {
            self.answer(self.service.delete_course(course_id).await)
        }

        async fn toggle_lesson(
            &self,
            course_id: CourseId,
            lesson_id: LessonId,
        ) -> Result<Course, CourseApiError> {
            self.answer(self.service.toggle_lesson(course_id, lesson_id).await)
        }

        async fn complete_course(&self, course_id: CourseId) -> Result<Course, CourseApiError> {
            self.answer(self.service.complete_course(course_id).await)
        }

        async fn reset_course(&self, course_id: CourseId) -> Result<Course, CourseApiError> {
            self.answer(self.service.reset_course(course_id).await)
        }
    }

    async fn loaded_mirror(api: &Arc<LocalApi>) -> CourseMirror {
        let handle: Arc<dyn CourseApi> = Arc::clone(api) as Arc<dyn CourseApi>;
        let mut mirror = CourseMirror::new(handle);
        mirror.refresh().await.unwrap();
        mirror
    }

    #[tokio::test]
    async fn refresh_failure_keeps_previous_replica() {
        let api = LocalApi::seeded();
        let mut mirror = loaded_mirror(&api).await;
        let before = mirror.courses().to_vec();

        api.service.complete_course(CourseId::new(1)).await.unwrap();
        api.set_offline(true);
        assert!(mirror.refresh().await.is_err());
        assert_eq!(mirror.courses(), before.as_slice());

        api.set_offline(false);
        mirror.refresh().await.unwrap();
        assert!(mirror.courses()[0].is_completed());
    }

    #[tokio::test]
    async fn selection_requires_known_course() {
        let api = LocalApi::seeded();
        let mut mirror = loaded_mirror(&api).await;

        assert!(!mirror.select_course(CourseId::new(40)));
        assert_eq!(mirror.screen(), Screen::List);

        assert!(mirror.select_course(CourseId::new(2)));
        assert_eq!(mirror.screen(), Screen::Detail(CourseId::new(2)));
        assert_eq!(mirror.current_course().unwrap().title(), "Web Design Basics");

        mirror.show_list();
        assert_eq!(mirror.screen(), Screen::List);
        assert!(mirror.detail().is_none());
    }

    #[tokio::test]
    async fn actions_need_a_selected_course() {
        let api = LocalApi::seeded();
        let mut mirror = loaded_mirror(&api).await;
        let err = mirror.toggle_lesson(LessonId::new(1)).await.unwrap_err();
        assert!(matches!(err, MirrorError::NoCourseSelected));
    }

    #[tokio::test]
    async fn toggle_replaces_local_copy_with_server_course() {
        let api = LocalApi::seeded();
        let mut mirror = loaded_mirror(&api).await;
        mirror.select_course(CourseId::new(1));

        mirror.toggle_lesson(LessonId::new(1)).await.unwrap();
        let current = mirror.current_course().unwrap();
        assert_eq!(progress_percent(current), 20);
        assert_eq!(
            current,
            &api.service.get_course(CourseId::new(1)).await.unwrap()
        );
    }

    #[tokio::test]
    async fn failed_toggle_leaves_replica_untouched() {
        let api = LocalApi::seeded();
        let mut mirror = loaded_mirror(&api).await;
        mirror.select_course(CourseId::new(1));
        let before = mirror.current_course().cloned();

        let err = mirror.toggle_lesson(LessonId::new(12)).await.unwrap_err();
        assert!(matches!(err, MirrorError::Api(ref e) if e.is_not_found()));
        assert_eq!(mirror.current_course().cloned(), before);

        api.set_offline(true);
        assert!(mirror.toggle_lesson(LessonId::new(1)).await.is_err());
        assert_eq!(mirror.current_course().cloned(), before);
    }

    #[tokio::test]
    async fn complete_sets_status_and_skips_completed_course() {
        let api = LocalApi::seeded();
        let mut mirror = loaded_mirror(&api).await;
        mirror.select_course(CourseId::new(4));

        mirror.complete_current().await.unwrap();
        assert_eq!(mirror.status_message(), Some(COMPLETED_MESSAGE));
        let detail = mirror.detail().unwrap();
        assert_eq!(detail.progress, 100);
        assert_eq!(detail.complete_button_label, "✓ Course Completed");

        // Already completed: no request goes out, so being offline is harmless.
        api.set_offline(true);
        mirror.complete_current().await.unwrap();

        mirror.select_course(CourseId::new(4));
        assert_eq!(mirror.status_message(), None);
    }

    #[tokio::test]
    async fn apply_update_ignores_unknown_course() {
        let api = LocalApi::seeded();
        let mut mirror = loaded_mirror(&api).await;
        let stranger = Course::new(CourseId::new(77), "Ghost", "Not here", Vec::new());
        assert!(!mirror.apply_update(stranger));
        assert_eq!(mirror.courses().len(), 4);
    }

    #[tokio::test]
    async fn refresh_drops_detail_screen_for_deleted_course() {
        let api = LocalApi::seeded();
        let mut mirror = loaded_mirror(&api).await;
        mirror.select_course(CourseId::new(3));

        api.service.delete_course(CourseId::new(3)).await.unwrap();
        mirror.refresh().await.unwrap();
        assert_eq!(mirror.screen(), Screen::List);
        assert_eq!(mirror.course_cards().len(), 3);
    }
}
