//! Course module - Catalog entries and their lessons.
//!
//! A `Course` carries the optional constraints that gate enrollment
//! (capacity, deadline, prerequisites). A course owns its `Lesson` set.

mod entity;
mod deadline;
mod lesson;

pub use entity::Course;
pub use deadline::DeadlineWindow;
pub use lesson::Lesson;
