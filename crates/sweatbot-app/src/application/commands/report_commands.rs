use sweatbot_domain::report::ReportTransition;
use sweatbot_domain::shared::MemberId;

use super::command_handler::Command;

/// `#lapor`: record today's activity for a member
#[derive(Debug, Clone)]
pub struct ReportActivityCommand {
    pub member_id: MemberId,
    pub display_name: String,
}

impl Command for ReportActivityCommand {}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportActivityResult {
    pub transition: ReportTransition,
    pub streak: u32,
    pub activity_count: u32,
    /// Text to post back to the chat
    pub reply: String,
}
