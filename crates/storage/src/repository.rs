use async_trait::async_trait;
use course_core::model::{Course, CourseError, CourseId, CourseMutation, ValidatedCourse};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

use crate::seed::default_catalog;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error(transparent)]
    Course(#[from] CourseError),
}

/// Repository contract for courses and their lessons.
///
/// Every method returns owned snapshots; the repository keeps the only
/// mutable copy.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// List all courses in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the collection cannot be read.
    async fn list_courses(&self) -> Result<Vec<Course>, StorageError>;

    /// Fetch a course by ID.
    ///
    /// Returns `Ok(None)` when the course does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the collection cannot be read.
    async fn get_course(&self, id: CourseId) -> Result<Option<Course>, StorageError>;

    /// Assign a fresh identifier to a validated course and append it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the course cannot be stored.
    async fn insert_new_course(&self, course: ValidatedCourse) -> Result<Course, StorageError>;

    /// Remove a course, returning it.
    ///
    /// Returns `Ok(None)` when the course does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the collection cannot be written.
    async fn delete_course(&self, id: CourseId) -> Result<Option<Course>, StorageError>;

    /// Apply a mutation to a stored course in place and return the result.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the course is missing and
    /// `StorageError::Course` if the mutation is rejected by the course.
    async fn apply_mutation(
        &self,
        id: CourseId,
        mutation: CourseMutation,
    ) -> Result<Course, StorageError>;
}

#[derive(Debug)]
struct CourseTable {
    courses: Vec<Course>,
    next_id: u64,
}

impl CourseTable {
    fn with_courses(courses: Vec<Course>) -> Self {
        let next_id = courses
            .iter()
            .map(|c| c.id().value())
            .max()
            .map_or(1, |max| max + 1);
        Self { courses, next_id }
    }

    fn position(&self, id: CourseId) -> Option<usize> {
        self.courses.iter().position(|c| c.id() == id)
    }
}

/// In-memory course store.
///
/// Identifiers come from a monotonic counter, so an id freed by a deletion
/// is never handed out again.
#[derive(Clone)]
pub struct InMemoryRepository {
    table: Arc<Mutex<CourseTable>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// An empty store whose first course gets id 1.
    #[must_use]
    pub fn new() -> Self {
        Self::with_courses(Vec::new())
    }

    /// A store preloaded with `courses`; new ids continue after the highest one.
    #[must_use]
    pub fn with_courses(courses: Vec<Course>) -> Self {
        Self {
            table: Arc::new(Mutex::new(CourseTable::with_courses(courses))),
        }
    }

    /// A store preloaded with the default course catalog.
    #[must_use]
    pub fn seeded() -> Self {
        Self::with_courses(default_catalog())
    }

    fn lock(&self) -> Result<MutexGuard<'_, CourseTable>, StorageError> {
        self.table
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl CourseRepository for InMemoryRepository {
    async fn list_courses(&self) -> Result<Vec<Course>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.courses.clone())
    }

    async fn get_course(&self, id: CourseId) -> Result<Option<Course>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.courses.iter().find(|c| c.id() == id).cloned())
    }

    async fn insert_new_course(&self, course: ValidatedCourse) -> Result<Course, StorageError> {
        let mut guard = self.lock()?;
        let id = CourseId::new(guard.next_id);
        guard.next_id += 1;
        let course = course.assign_id(id);
        guard.courses.push(course.clone());
        Ok(course)
    }

    async fn delete_course(&self, id: CourseId) -> Result<Option<Course>, StorageError> {
        let mut guard = self.lock()?;
        Ok(guard.position(id).map(|idx| guard.courses.remove(idx)))
    }

    async fn apply_mutation(
        &self,
        id: CourseId,
        mutation: CourseMutation,
    ) -> Result<Course, StorageError> {
        let mut guard = self.lock()?;
        let idx = guard.position(id).ok_or(StorageError::NotFound)?;
        let course = &mut guard.courses[idx];
        course.apply(mutation)?;
        Ok(course.clone())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub courses: Arc<dyn CourseRepository>,
}

impl Storage {
    /// Empty in-memory storage.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repository(InMemoryRepository::new())
    }

    /// In-memory storage preloaded with the default catalog.
    #[must_use]
    pub fn seeded() -> Self {
        Self::from_repository(InMemoryRepository::seeded())
    }

    fn from_repository(repo: InMemoryRepository) -> Self {
        let courses: Arc<dyn CourseRepository> = Arc::new(repo);
        Self { courses }
    }
}
