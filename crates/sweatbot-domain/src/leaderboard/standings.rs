use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::report::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandingStatus {
    /// Reported today or yesterday.
    Active,
    /// Last report predates yesterday; the stored streak is the one that broke.
    Lost,
}

/// One numbered line of the leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub rank: usize,
    pub display_name: String,
    pub streak: u32,
    pub activity_count: u32,
    pub status: StandingStatus,
}

/// Ranked snapshot of every member's report at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaderboard {
    day: u32,
    date: NaiveDate,
    active: Vec<Standing>,
    lost: Vec<Standing>,
}

impl Leaderboard {
    /// Partition by streak status, sort each partition by streak (highest
    /// first, ties keep their input order) and number the active partition
    /// before the lost one.
    pub fn build(reports: &[Report], now: DateTime<FixedOffset>) -> Self {
        let (mut active, mut lost): (Vec<&Report>, Vec<&Report>) =
            reports.iter().partition(|r| r.keeps_streak_at(now));

        active.sort_by(|a, b| b.streak().cmp(&a.streak()));
        lost.sort_by(|a, b| b.streak().cmp(&a.streak()));

        let day = reports.iter().map(Report::activity_count).max().unwrap_or(0);

        let active_len = active.len();
        let active = Self::rank(active, 1, StandingStatus::Active);
        let lost = Self::rank(lost, active_len + 1, StandingStatus::Lost);

        Self {
            day,
            date: now.date_naive(),
            active,
            lost,
        }
    }

    fn rank(reports: Vec<&Report>, first_rank: usize, status: StandingStatus) -> Vec<Standing> {
        reports
            .into_iter()
            .enumerate()
            .map(|(i, r)| Standing {
                rank: first_rank + i,
                display_name: r.display_name().to_string(),
                streak: r.streak(),
                activity_count: r.activity_count(),
                status,
            })
            .collect()
    }

    /// Challenge day shown in the header: the highest lifetime count.
    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn active(&self) -> &[Standing] {
        &self.active
    }

    pub fn lost(&self) -> &[Standing] {
        &self.lost
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.lost.is_empty()
    }

    /// All standings in rank order.
    pub fn standings(&self) -> impl Iterator<Item = &Standing> {
        self.active.iter().chain(self.lost.iter())
    }
}
