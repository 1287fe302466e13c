#![forbid(unsafe_code)]

pub mod envelope;
pub mod model;
pub mod time;

pub use envelope::Envelope;
pub use time::Clock;
