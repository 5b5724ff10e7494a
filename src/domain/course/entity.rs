//! Course entity.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::DeadlineWindow;
use crate::domain::foundation::{CourseId, Percentage, Timestamp};

/// A course as read from the catalog.
///
/// `capacity` and `enrollment_deadline` are optional constraints; absence
/// means unconstrained. `current_enrollments` is the authoritative seat
/// count and is only adjusted through [`Course::record_enrollment`] and
/// [`Course::record_unenrollment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub capacity: Option<u32>,

    #[serde(default)]
    pub current_enrollments: u32,

    #[serde(default)]
    pub enrollment_deadline: Option<Timestamp>,

    #[serde(default)]
    pub prerequisites: BTreeSet<CourseId>,

    #[serde(default)]
    pub price_cents: u64,
}

impl Course {
    /// Creates an unconstrained, free course.
    pub fn new(id: CourseId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            capacity: None,
            current_enrollments: 0,
            enrollment_deadline: None,
            prerequisites: BTreeSet::new(),
            price_cents: 0,
        }
    }

    pub fn with_capacity(mut self, capacity: u32, current_enrollments: u32) -> Self {
        self.capacity = Some(capacity);
        self.current_enrollments = current_enrollments;
        self
    }

    pub fn with_deadline(mut self, deadline: Timestamp) -> Self {
        self.enrollment_deadline = Some(deadline);
        self
    }

    pub fn with_prerequisites(mut self, prerequisites: impl IntoIterator<Item = CourseId>) -> Self {
        self.prerequisites = prerequisites.into_iter().collect();
        self
    }

    pub fn with_price_cents(mut self, price_cents: u64) -> Self {
        self.price_cents = price_cents;
        self
    }

    /// Returns true when a capacity is set and every seat is taken.
    pub fn is_full(&self) -> bool {
        matches!(self.capacity, Some(capacity) if self.current_enrollments >= capacity)
    }

    /// Returns true when a deadline is set and `now` is strictly after it.
    pub fn is_deadline_passed(&self, now: &Timestamp) -> bool {
        matches!(&self.enrollment_deadline, Some(deadline) if now.is_after(deadline))
    }

    /// Prerequisites not present in `completed`, in id order.
    pub fn missing_prerequisites(&self, completed: &BTreeSet<CourseId>) -> BTreeSet<CourseId> {
        self.prerequisites.difference(completed).cloned().collect()
    }

    /// Seats left, or `None` when the course is unconstrained.
    pub fn seats_remaining(&self) -> Option<u32> {
        self.capacity
            .map(|capacity| capacity.saturating_sub(self.current_enrollments))
    }

    /// Share of capacity taken, or `None` when the course is unconstrained.
    pub fn capacity_usage(&self) -> Option<Percentage> {
        self.capacity.map(|capacity| {
            if capacity == 0 {
                Percentage::HUNDRED
            } else {
                Percentage::from_ratio(self.current_enrollments as usize, capacity as usize)
            }
        })
    }

    /// Time left before enrollment closes, or `None` without a deadline.
    pub fn deadline_window(&self, now: &Timestamp) -> Option<DeadlineWindow> {
        self.enrollment_deadline
            .as_ref()
            .map(|deadline| DeadlineWindow::at(deadline, now))
    }

    pub fn is_free(&self) -> bool {
        self.price_cents == 0
    }

    /// Takes one seat.
    pub fn record_enrollment(&mut self) {
        self.current_enrollments = self.current_enrollments.saturating_add(1);
    }

    /// Releases one seat, never going below zero.
    pub fn record_unenrollment(&mut self) {
        self.current_enrollments = self.current_enrollments.saturating_sub(1);
    }
}
