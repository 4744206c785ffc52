use assigner_errors::AssignerResult;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::entities::StaffTask;
use crate::value_objects::TimeFrame;

/// Domain service for resource availability checking business logic
/// This contains the core interval-overlap algorithm used before submission
pub struct AvailabilityService;

impl AvailabilityService {
    /// Reject zero-length or inverted intervals before any overlap test runs
    pub fn validate_interval(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AssignerResult<()> {
        TimeFrame::new(start, end).map(|_| ())
    }

    /// Check whether a resource is free over the half-open candidate interval.
    /// `existing_tasks` is the full fetched set for the role; filtering by
    /// `resource_id` is part of this check.
    pub fn is_available(
        resource_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        existing_tasks: &[StaffTask],
    ) -> AssignerResult<bool> {
        Ok(Self::first_conflict(resource_id, start, end, existing_tasks)?.is_none())
    }

    /// Same scan as `is_available`, but returns the blocking task so callers
    /// can report which booking occupies the slot.
    pub fn first_conflict<'a>(
        resource_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        existing_tasks: &'a [StaffTask],
    ) -> AssignerResult<Option<&'a StaffTask>> {
        let candidate = TimeFrame::new(start, end)?;

        let conflict = existing_tasks
            .iter()
            .find(|task| task.resource_id == resource_id && candidate.overlaps(&task.time_frame));

        if let Some(task) = conflict {
            debug!(
                "Candidate slot [{start}, {end}) conflicts with task {} on resource {resource_id}",
                task.code
            );
        }
        Ok(conflict)
    }
}
