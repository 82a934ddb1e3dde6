use chrono::NaiveDate;

/// How a member's last accepted report day relates to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayGap {
    /// Last report was today.
    SameDay,
    /// Last report was yesterday; the streak can be extended.
    Consecutive,
    /// At least one full calendar day was skipped.
    Broken { days: i64 },
    /// Last report is dated after today (the reference clock moved backwards).
    Ahead,
}

/// Domain service for the calendar-day streak rules.
/// Contains pure domain logic without infrastructure dependencies.
pub struct StreakRules;

impl StreakRules {
    /// Compare two calendar days. Time of day never matters here and there is
    /// no grace window around midnight.
    pub fn day_gap(last_day: NaiveDate, today: NaiveDate) -> DayGap {
        match today.signed_duration_since(last_day).num_days() {
            0 => DayGap::SameDay,
            1 => DayGap::Consecutive,
            days if days > 1 => DayGap::Broken { days },
            _ => DayGap::Ahead,
        }
    }

    /// A member keeps the streak while their last report was today or
    /// yesterday, since they can still report before the day ends.
    pub fn keeps_streak(last_day: NaiveDate, today: NaiveDate) -> bool {
        matches!(
            Self::day_gap(last_day, today),
            DayGap::SameDay | DayGap::Consecutive
        )
    }
}
