//! Time remaining before a course stops accepting enrollments.

use serde::Serialize;
use std::fmt;

use crate::domain::foundation::Timestamp;

/// Coarse countdown to an enrollment deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "window", rename_all = "snake_case")]
pub enum DeadlineWindow {
    /// At least one whole day remains.
    Open { days_left: i64 },
    /// Less than a day but at least one whole hour remains.
    ClosingSoon { hours_left: i64 },
    /// Less than an hour remains.
    LastHour,
    /// The deadline has passed.
    Closed,
}

impl DeadlineWindow {
    /// Classifies the time between `now` and `deadline`.
    ///
    /// Enrollment stays open up to and including the deadline instant.
    pub fn at(deadline: &Timestamp, now: &Timestamp) -> Self {
        if now.is_after(deadline) {
            return DeadlineWindow::Closed;
        }
        let remaining = deadline.duration_since(now);
        let days = remaining.num_days();
        let hours = remaining.num_hours() - days * 24;
        if days > 0 {
            DeadlineWindow::Open { days_left: days }
        } else if hours > 0 {
            DeadlineWindow::ClosingSoon { hours_left: hours }
        } else {
            DeadlineWindow::LastHour
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, DeadlineWindow::Closed)
    }
}

impl fmt::Display for DeadlineWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeadlineWindow::Open { days_left } => write!(f, "{} day(s) left", days_left),
            DeadlineWindow::ClosingSoon { hours_left } => write!(f, "{} hour(s) left", hours_left),
            DeadlineWindow::LastHour => write!(f, "Less than 1 hour left"),
            DeadlineWindow::Closed => write!(f, "Enrollment closed"),
        }
    }
}
