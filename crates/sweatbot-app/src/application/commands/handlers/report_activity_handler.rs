use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::report_commands::{ReportActivityCommand, ReportActivityResult};
use crate::application::services::messages;
use sweatbot_domain::clock::Clock;
use sweatbot_domain::report::{Report, ReportRepository, ReportTransition};
use sweatbot_domain::shared::DomainError;

/// Applies one `#lapor` to the member's report.
///
/// The member lock is held from the read to the write, so two reports from
/// the same member never both land on the same day.
pub struct ReportActivityCommandHandler {
    report_repo: Arc<dyn ReportRepository>,
    clock: Arc<dyn Clock>,
}

impl ReportActivityCommandHandler {
    pub fn new(report_repo: Arc<dyn ReportRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { report_repo, clock }
    }
}

#[async_trait]
impl CommandHandler<ReportActivityCommand> for ReportActivityCommandHandler {
    type Result = ReportActivityResult;

    async fn handle(&self, cmd: ReportActivityCommand) -> Result<Self::Result, DomainError> {
        let _lock = self.report_repo.lock_member(&cmd.member_id).await?;
        let now = self.clock.now();

        let (report, transition) = match self.report_repo.find_by_member(&cmd.member_id).await? {
            Some(mut report) => {
                let transition = report.record(&cmd.display_name, now);
                (report, transition)
            }
            None => (
                Report::first(cmd.member_id.clone(), cmd.display_name.clone(), now)?,
                ReportTransition::Started,
            ),
        };

        if transition.is_accepted() {
            self.report_repo.save(&report).await?;
        }

        info!(
            member_id = %cmd.member_id,
            outcome = transition.as_str(),
            streak = report.streak(),
            activity_count = report.activity_count(),
            "Report handled"
        );

        let reply = if transition.is_accepted() {
            messages::report_accepted(&cmd.display_name, report.activity_count())
        } else {
            messages::report_rejected(&cmd.display_name)
        };

        Ok(ReportActivityResult {
            transition,
            streak: report.streak(),
            activity_count: report.activity_count(),
            reply,
        })
    }
}
