use chrono::{DateTime, FixedOffset, NaiveDate};

/// Source of "now" for the calendar-day accounting rules.
///
/// The offset of the returned instant is the local reference every calendar
/// day comparison is made in, so stored timestamps are converted into it
/// before their day is taken.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Clock pinned to a single instant. Used by tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<FixedOffset>,
}

impl FixedClock {
    pub fn new(instant: DateTime<FixedOffset>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.instant
    }
}
