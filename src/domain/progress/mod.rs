//! Progress domain module.
//!
//! Pure rollups of lesson completion into per-course and per-learner
//! snapshots, recomputed from source state on every read.

mod errors;
mod snapshot;

pub use errors::ProgressError;
pub use snapshot::{
    completed_course_ids, course_progress, learner_progress, next_lesson, CourseProgress,
    LearnerProgress,
};
