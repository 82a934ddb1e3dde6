use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::handlers::ReportActivityCommandHandler;
use crate::application::commands::report_commands::ReportActivityCommand;
use crate::application::queries::LeaderboardQueryService;
use sweatbot_domain::shared::{DomainError, MemberId};

const REPORT_TOKEN: &str = "#lapor";
const LEADERBOARD_TOKEN: &str = "#leaderboard";

/// Chat commands the bot answers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Report,
    Leaderboard,
}

impl BotCommand {
    /// Case-insensitive prefix match on the trimmed text. Anything after the
    /// token is ignored.
    pub fn parse(text: &str) -> Option<Self> {
        let normalized = text.trim().to_lowercase();

        if normalized.starts_with(REPORT_TOKEN) {
            Some(BotCommand::Report)
        } else if normalized.starts_with(LEADERBOARD_TOKEN) {
            Some(BotCommand::Leaderboard)
        } else {
            None
        }
    }
}

pub struct MessageRouter {
    report_handler: Arc<ReportActivityCommandHandler>,
    leaderboard: Arc<LeaderboardQueryService>,
}

impl MessageRouter {
    pub fn new(
        report_handler: Arc<ReportActivityCommandHandler>,
        leaderboard: Arc<LeaderboardQueryService>,
    ) -> Self {
        Self {
            report_handler,
            leaderboard,
        }
    }

    /// Reply for `text`, or `None` when the text is not a command.
    pub async fn route(
        &self,
        member_id: &MemberId,
        display_name: &str,
        text: &str,
    ) -> Result<Option<String>, DomainError> {
        let Some(command) = BotCommand::parse(text) else {
            return Ok(None);
        };

        let reply = match command {
            BotCommand::Report => {
                let cmd = ReportActivityCommand {
                    member_id: member_id.clone(),
                    display_name: display_name.to_string(),
                };
                self.report_handler.handle(cmd).await?.reply
            }
            BotCommand::Leaderboard => self.leaderboard.render_leaderboard().await?,
        };

        Ok(Some(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_and_whitespace_insensitive() {
        assert_eq!(BotCommand::parse("#lapor"), Some(BotCommand::Report));
        assert_eq!(BotCommand::parse("  #LAPOR \n"), Some(BotCommand::Report));
        assert_eq!(BotCommand::parse("#Leaderboard"), Some(BotCommand::Leaderboard));
        assert_eq!(BotCommand::parse("\t#leaderBOARD  "), Some(BotCommand::Leaderboard));
    }

    #[test]
    fn test_parse_accepts_trailing_text() {
        assert_eq!(
            BotCommand::parse("#lapor hari ini lari 5km"),
            Some(BotCommand::Report)
        );
        assert_eq!(
            BotCommand::parse("#leaderboard dong"),
            Some(BotCommand::Leaderboard)
        );
    }

    #[test]
    fn test_parse_rejects_non_commands() {
        assert_eq!(BotCommand::parse(""), None);
        assert_eq!(BotCommand::parse("   "), None);
        assert_eq!(BotCommand::parse("lapor"), None);
        assert_eq!(BotCommand::parse("leaderboard"), None);
        assert_eq!(BotCommand::parse("aku mau #lapor"), None);
        assert_eq!(BotCommand::parse("#lap"), None);
    }
}
