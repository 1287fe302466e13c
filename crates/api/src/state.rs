use course_core::Clock;
use services::CourseService;
use storage::repository::Storage;

/// Shared handler state. Cloned per request; the store behind it is shared.
#[derive(Clone)]
pub struct AppState {
    pub courses: CourseService,
    pub clock: Clock,
}

impl AppState {
    #[must_use]
    pub fn new(storage: &Storage, clock: Clock) -> Self {
        Self {
            courses: CourseService::new(std::sync::Arc::clone(&storage.courses)),
            clock,
        }
    }
}
