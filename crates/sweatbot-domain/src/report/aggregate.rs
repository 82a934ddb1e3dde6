use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain_service::{DayGap, StreakRules};
use crate::shared::{DomainError, MemberId};

/// Outcome of applying one `#lapor` to a member's report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportTransition {
    /// First report ever; the record was just created.
    Started,
    /// Reported yesterday, so the streak grew by one.
    Extended,
    /// A day or more was skipped, or the last report is dated after today;
    /// the streak starts over at one.
    Restarted,
    /// Already reported today. Nothing changed.
    AlreadyReported,
}

impl ReportTransition {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, ReportTransition::AlreadyReported)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportTransition::Started => "started",
            ReportTransition::Extended => "extended",
            ReportTransition::Restarted => "restarted",
            ReportTransition::AlreadyReported => "already_reported",
        }
    }
}

/// Per-member activity record. Created by the first accepted report and
/// mutated in place by every later one; never deleted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    member_id: MemberId,
    display_name: String,
    streak: u32,
    activity_count: u32,
    last_report_at: DateTime<FixedOffset>,
}

impl Report {
    /// Record for a member's first accepted report.
    pub fn first(
        member_id: MemberId,
        display_name: impl Into<String>,
        now: DateTime<FixedOffset>,
    ) -> Result<Self, DomainError> {
        if member_id.is_blank() {
            return Err(DomainError::Validation(
                "Member id cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            member_id,
            display_name: display_name.into(),
            streak: 1,
            activity_count: 1,
            last_report_at: now,
        })
    }

    /// Rebuild a report from storage, refusing rows that break the counters'
    /// invariants.
    pub fn restore(
        member_id: MemberId,
        display_name: String,
        streak: u32,
        activity_count: u32,
        last_report_at: DateTime<FixedOffset>,
    ) -> Result<Self, DomainError> {
        if member_id.is_blank() {
            return Err(DomainError::DataIntegrity(
                "Stored report has an empty member id".to_string(),
            ));
        }
        if streak == 0 {
            return Err(DomainError::DataIntegrity(format!(
                "Report for {} has a zero streak",
                member_id
            )));
        }
        if activity_count < streak {
            return Err(DomainError::DataIntegrity(format!(
                "Report for {} has activity count {} below streak {}",
                member_id, activity_count, streak
            )));
        }

        Ok(Self {
            member_id,
            display_name,
            streak,
            activity_count,
            last_report_at,
        })
    }

    pub fn member_id(&self) -> &MemberId {
        &self.member_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn activity_count(&self) -> u32 {
        self.activity_count
    }

    pub fn last_report_at(&self) -> DateTime<FixedOffset> {
        self.last_report_at
    }

    /// Calendar day of the last accepted report, seen from `offset`.
    pub fn last_report_day(&self, offset: &FixedOffset) -> NaiveDate {
        self.last_report_at.with_timezone(offset).date_naive()
    }

    /// Whether the member still holds their streak at `now`.
    pub fn keeps_streak_at(&self, now: DateTime<FixedOffset>) -> bool {
        StreakRules::keeps_streak(self.last_report_day(now.offset()), now.date_naive())
    }

    /// Apply a new report made at `now`.
    ///
    /// The stored timestamp is converted into `now`'s offset before the
    /// calendar days are compared.
    pub fn record(&mut self, display_name: &str, now: DateTime<FixedOffset>) -> ReportTransition {
        let last_day = self.last_report_day(now.offset());

        let transition = match StreakRules::day_gap(last_day, now.date_naive()) {
            DayGap::SameDay => return ReportTransition::AlreadyReported,
            DayGap::Consecutive => {
                self.streak = self.streak.saturating_add(1);
                ReportTransition::Extended
            }
            DayGap::Broken { .. } | DayGap::Ahead => {
                self.streak = 1;
                ReportTransition::Restarted
            }
        };

        self.activity_count = self.activity_count.saturating_add(1);
        self.display_name = display_name.to_string();
        self.last_report_at = now;

        transition
    }
}
