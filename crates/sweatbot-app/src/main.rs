use sweatbot_infrastructure::config::BotConfig;
use sweatbot_infrastructure::transport::JsonLinesInbound;
use sweatbot_lib::presentation::{bot, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = BotConfig::load()?;

    let log_dir = config.log_dir();
    match sweatbot_infrastructure::logging::init_logger(
        log_dir.clone(),
        config.log_level,
        config.log_to_stdout,
    ) {
        Ok(()) => {
            tracing::info!("🚀 Sweatbot starting...");
            tracing::info!("📝 File logging initialized at: {}", log_dir.display());
        }
        Err(e) => {
            eprintln!("Failed to initialize file logger: {}", e);
            let _ = tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                )
                .try_init();
        }
    }

    let state = match AppState::new(config).await {
        Ok(state) => {
            tracing::info!("✅ App state initialized successfully");
            state
        }
        Err(e) => {
            tracing::error!("❌ Failed to initialize app state: {:#}", e);
            return Err(e);
        }
    };

    bot::run(state.services.dispatcher.clone(), JsonLinesInbound::stdin()).await?;

    tracing::info!("👋 Sweatbot stopped");
    Ok(())
}
