use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::application::services::messages;
use sweatbot_domain::clock::Clock;
use sweatbot_domain::leaderboard::Leaderboard;
use sweatbot_domain::report::ReportRepository;
use sweatbot_domain::shared::DomainError;

/// Read side for `#leaderboard`. Reads a snapshot without taking member locks.
pub struct LeaderboardQueryService {
    report_repo: Arc<dyn ReportRepository>,
    clock: Arc<dyn Clock>,
}

impl LeaderboardQueryService {
    pub fn new(report_repo: Arc<dyn ReportRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { report_repo, clock }
    }

    pub async fn get_leaderboard(&self) -> Result<Leaderboard, DomainError> {
        let reports = self.report_repo.find_all().await?;
        Ok(Leaderboard::build(&reports, self.clock.now()))
    }

    pub async fn render_leaderboard(&self) -> Result<String, DomainError> {
        let started_at = Instant::now();
        let leaderboard = self.get_leaderboard().await?;

        info!(
            day = leaderboard.day(),
            active = leaderboard.active().len(),
            lost = leaderboard.lost().len(),
            "Leaderboard built in {}ms",
            started_at.elapsed().as_millis()
        );

        Ok(messages::leaderboard(&leaderboard))
    }
}
