use assigner_errors::{AssignerError, AssignerResult};
use chrono::{DateTime, Utc};

/// 跨任务排序约束：仓库任务必须在前置任务（如验货任务）结束之后开始。
/// 未设置前置结束时间时约束恒通过。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrerequisiteConstraint {
    pub finished_at: Option<DateTime<Utc>>,
}

impl PrerequisiteConstraint {
    pub fn none() -> Self {
        Self { finished_at: None }
    }

    pub fn after(finished_at: DateTime<Utc>) -> Self {
        Self {
            finished_at: Some(finished_at),
        }
    }

    pub fn check(&self, start: DateTime<Utc>) -> AssignerResult<()> {
        if let Some(finished_at) = self.finished_at {
            if start < finished_at {
                return Err(AssignerError::PrerequisiteOrdering {
                    finished_at: finished_at.to_rfc3339(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_unset_prerequisite_always_passes() {
        let constraint = PrerequisiteConstraint::none();
        assert!(constraint.check(at(0)).is_ok());
    }

    #[test]
    fn test_start_before_prerequisite_finish_is_rejected() {
        let constraint = PrerequisiteConstraint::after(at(12));
        let error = constraint.check(at(10)).unwrap_err();
        assert!(matches!(
            error,
            AssignerError::PrerequisiteOrdering { .. }
        ));
    }

    #[test]
    fn test_start_at_or_after_prerequisite_finish_passes() {
        let constraint = PrerequisiteConstraint::after(at(12));
        assert!(constraint.check(at(12)).is_ok());
        assert!(constraint.check(at(13)).is_ok());
    }
}
