//! Client-side replica of the course collection and its view models.

#![forbid(unsafe_code)]

pub mod mirror;
pub mod views;
pub mod vm;

pub use mirror::{CourseMirror, MirrorError};
pub use views::Screen;
