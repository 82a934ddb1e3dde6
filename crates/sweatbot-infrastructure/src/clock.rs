use chrono::{DateTime, FixedOffset, Local, Utc};

use sweatbot_domain::clock::Clock;

/// Wall clock. Reads the process' local offset unless a fixed offset is
/// configured, so a server running in UTC can still count days in the
/// group's timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    offset: Option<FixedOffset>,
}

impl SystemClock {
    pub fn local() -> Self {
        Self { offset: None }
    }

    pub fn with_offset(offset: FixedOffset) -> Self {
        Self {
            offset: Some(offset),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        match self.offset {
            Some(offset) => Utc::now().with_timezone(&offset),
            None => Local::now().fixed_offset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_offset_is_used() {
        let offset = FixedOffset::east_opt(7 * 3600).unwrap();
        let clock = SystemClock::with_offset(offset);

        let now = clock.now();
        assert_eq!(now.offset(), &offset);
        assert!((Utc::now() - now.with_timezone(&Utc)).num_seconds().abs() < 5);
    }
}
