use course_core::model::CourseId;

/// Which screen the client shows. List and Detail are mutually exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    List,
    Detail(CourseId),
}

impl Screen {
    /// The course shown on the detail screen, if any.
    #[must_use]
    pub fn course_id(self) -> Option<CourseId> {
        match self {
            Self::List => None,
            Self::Detail(id) => Some(id),
        }
    }
}
