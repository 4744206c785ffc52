use assigner_errors::{AssignerError, AssignerResult};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// 半开时间区间 [start, end)，构造时保证 end > start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeFrame {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeFrame {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> AssignerResult<Self> {
        if end <= start {
            return Err(AssignerError::invalid_time_frame(
                start.to_rfc3339(),
                end.to_rfc3339(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// 对称的半开区间重叠判定
    pub fn overlaps(&self, other: &TimeFrame) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }

    /// 保持开始时间不变，按分钟数重新计算结束时间。
    /// 分钟数溢出时间轴时按无效区间拒绝，不会panic。
    pub fn with_duration_minutes(&self, minutes: i64) -> AssignerResult<Self> {
        let end = Duration::try_minutes(minutes)
            .and_then(|duration| self.start.checked_add_signed(duration))
            .ok_or_else(|| {
                AssignerError::invalid_time_frame(
                    self.start.to_rfc3339(),
                    format!("{minutes} 分钟后"),
                )
            })?;
        Self::new(self.start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_new_rejects_inverted_and_empty_frames() {
        assert!(TimeFrame::new(at(10, 0), at(9, 0)).is_err());
        assert!(TimeFrame::new(at(10, 0), at(10, 0)).is_err());
        assert!(TimeFrame::new(at(9, 0), at(10, 0)).is_ok());
    }

    #[test]
    fn test_duration_minutes() {
        let frame = TimeFrame::new(at(9, 0), at(10, 30)).unwrap();
        assert_eq!(frame.duration_minutes(), 90);
    }

    #[test]
    fn test_overlaps_is_symmetric() {
        let morning = TimeFrame::new(at(9, 0), at(10, 0)).unwrap();
        let inner = TimeFrame::new(at(9, 30), at(9, 45)).unwrap();
        let later = TimeFrame::new(at(10, 0), at(10, 30)).unwrap();

        assert!(morning.overlaps(&inner));
        assert!(inner.overlaps(&morning));
        // 边界相接不算重叠
        assert!(!morning.overlaps(&later));
        assert!(!later.overlaps(&morning));
    }

    #[test]
    fn test_contains_uses_half_open_bounds() {
        let frame = TimeFrame::new(at(9, 0), at(10, 0)).unwrap();
        assert!(frame.contains(at(9, 0)));
        assert!(frame.contains(at(9, 59)));
        assert!(!frame.contains(at(10, 0)));
    }

    #[test]
    fn test_with_duration_minutes() {
        let frame = TimeFrame::new(at(9, 0), at(9, 30)).unwrap();
        let extended = frame.with_duration_minutes(90).unwrap();
        assert_eq!(extended.start, frame.start);
        assert_eq!(extended.end, at(10, 30));

        assert!(frame.with_duration_minutes(0).is_err());
        assert!(frame.with_duration_minutes(-15).is_err());
    }

    #[test]
    fn test_with_duration_minutes_overflow_is_rejected() {
        let frame = TimeFrame::new(at(9, 0), at(9, 30)).unwrap();
        // 溢出时间轴的分钟数返回错误而不是panic
        assert!(frame.with_duration_minutes(i64::MAX).is_err());
        assert!(frame.with_duration_minutes(i64::MIN).is_err());
    }
}
