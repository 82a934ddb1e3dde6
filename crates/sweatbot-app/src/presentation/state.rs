use std::sync::Arc;

use crate::application::commands::handlers::ReportActivityCommandHandler;
use crate::application::queries::LeaderboardQueryService;
use crate::application::services::{MessageDispatcher, MessageRouter};
use sweatbot_domain::clock::Clock;
use sweatbot_domain::report::ReportRepository;
use sweatbot_domain::transport::ReplySender;
use sweatbot_infrastructure::config::BotConfig;
use sweatbot_infrastructure::persistence::{repositories::SqliteMemberAliasRepository, Database};

/// Command handlers container
pub struct CommandHandlers {
    pub report_activity: Arc<ReportActivityCommandHandler>,
}

pub struct Runtime {
    pub config: BotConfig,
    pub db: Arc<Database>,
    pub clock: Arc<dyn Clock>,
}

pub struct Repositories {
    pub report: Arc<dyn ReportRepository>,
    pub member_alias: Arc<SqliteMemberAliasRepository>,
}

pub struct Services {
    pub reply_sender: Arc<dyn ReplySender>,
    pub router: Arc<MessageRouter>,
    pub dispatcher: Arc<MessageDispatcher>,
}

pub struct Queries {
    pub leaderboard: Arc<LeaderboardQueryService>,
}

pub struct AppState {
    pub runtime: Runtime,
    pub repositories: Repositories,
    pub services: Services,
    pub queries: Queries,
    pub command_handlers: CommandHandlers,
}

impl AppState {
    pub async fn new(config: BotConfig) -> anyhow::Result<Self> {
        crate::presentation::bootstrap::build_app_state(config).await
    }
}
