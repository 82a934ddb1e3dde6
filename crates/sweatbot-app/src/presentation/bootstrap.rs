use anyhow::Context;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::application::commands::handlers::ReportActivityCommandHandler;
use crate::application::queries::LeaderboardQueryService;
use crate::application::services::{MessageDispatcher, MessageRouter, ReplyPacer};
use crate::presentation::state::{
    AppState, CommandHandlers, Queries, Repositories, Runtime, Services,
};
use sweatbot_domain::clock::Clock;
use sweatbot_domain::report::ReportRepository;
use sweatbot_domain::shared::ChatId;
use sweatbot_infrastructure::clock::SystemClock;
use sweatbot_infrastructure::config::BotConfig;
use sweatbot_infrastructure::persistence::{
    repositories::{SqliteMemberAliasRepository, SqliteReportRepository},
    Database,
};
use sweatbot_infrastructure::transport::create_reply_sender;

pub async fn build_app_state(config: BotConfig) -> anyhow::Result<AppState> {
    let startup_started_at = Instant::now();

    let db_path = config
        .sqlite_path
        .to_str()
        .context("Invalid database path")?
        .to_string();
    info!("Database path: {}", db_path);

    let started_at = Instant::now();
    let db = Database::new(&db_path)
        .await
        .context("Failed to open database")?;
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    info!(
        "✓ Database ready ({}ms)",
        started_at.elapsed().as_millis()
    );

    let clock: Arc<dyn Clock> = match config.utc_offset() {
        Some(offset) => {
            info!("Counting days in fixed offset {}", offset);
            Arc::new(SystemClock::with_offset(offset))
        }
        None => Arc::new(SystemClock::local()),
    };

    let pool = Arc::new(db.pool().clone());
    let report_repo: Arc<dyn ReportRepository> = Arc::new(SqliteReportRepository::new(pool.clone()));
    let member_alias_repo = Arc::new(SqliteMemberAliasRepository::new(pool));
    info!("✓ Repositories initialized");

    let report_activity = Arc::new(ReportActivityCommandHandler::new(
        report_repo.clone(),
        clock.clone(),
    ));
    let leaderboard = Arc::new(LeaderboardQueryService::new(
        report_repo.clone(),
        clock.clone(),
    ));
    let router = Arc::new(MessageRouter::new(
        report_activity.clone(),
        leaderboard.clone(),
    ));

    let reply_sender = create_reply_sender(&config).context("Failed to create reply sender")?;
    let pacer = ReplyPacer::new(
        config.reply_delay_min_ms,
        config.reply_delay_max_ms,
        config.show_typing,
    );
    let group_id = config.group_id.as_deref().map(ChatId::from_string);
    match &group_id {
        Some(group_id) => info!("Listening to group {}", group_id),
        None => info!("No group configured, listening to every chat"),
    }

    let dispatcher = Arc::new(MessageDispatcher::new(
        router.clone(),
        member_alias_repo.clone(),
        reply_sender.clone(),
        pacer,
        group_id,
    ));
    info!("✓ Message dispatcher ready");

    info!(
        "✓ App state built in {}ms",
        startup_started_at.elapsed().as_millis()
    );

    Ok(AppState {
        runtime: Runtime {
            config,
            db: Arc::new(db),
            clock,
        },
        repositories: Repositories {
            report: report_repo,
            member_alias: member_alias_repo,
        },
        services: Services {
            reply_sender,
            router,
            dispatcher,
        },
        queries: Queries { leaderboard },
        command_handlers: CommandHandlers { report_activity },
    })
}
