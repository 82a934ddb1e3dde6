use std::future::Future;
use std::sync::Arc;
use tokio::io::AsyncBufRead;
use tokio::task::{JoinError, JoinSet};
use tracing::{error, info, warn};

use crate::application::services::{DispatchOutcome, MessageDispatcher};
use sweatbot_infrastructure::transport::JsonLinesInbound;

/// Run until Ctrl-C / SIGTERM or until the inbound stream ends.
pub async fn run<R>(dispatcher: Arc<MessageDispatcher>, inbound: JsonLinesInbound<R>) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    run_until(dispatcher, inbound, wait_for_shutdown_signal()).await
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
                return;
            }
            Err(e) => warn!("Failed to register SIGTERM handler: {}", e),
        }
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Dispatch every inbound message on its own task until `shutdown`
/// resolves or the stream ends. On shutdown in-flight messages are dropped;
/// at end of stream they are awaited.
pub async fn run_until<R, S>(
    dispatcher: Arc<MessageDispatcher>,
    mut inbound: JsonLinesInbound<R>,
    shutdown: S,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    S: Future<Output = ()>,
{
    let mut tasks: JoinSet<DispatchOutcome> = JoinSet::new();
    tokio::pin!(shutdown);

    info!("Bot is running... Press Ctrl+C to exit.");

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutting down, {} message(s) in flight dropped", tasks.len());
                tasks.abort_all();
                return Ok(());
            }
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                log_finished(joined);
            }
            next = inbound.next_message() => match next {
                Ok(Some(message)) => {
                    let dispatcher = dispatcher.clone();
                    tasks.spawn(async move { dispatcher.dispatch(message).await });
                }
                Ok(None) => break,
                Err(e) => {
                    error!("Inbound stream failed: {}", e);
                    break;
                }
            },
        }
    }

    info!("Inbound stream closed, waiting for {} message(s)", tasks.len());
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tasks.abort_all();
                return Ok(());
            }
            joined = tasks.join_next() => match joined {
                Some(joined) => log_finished(joined),
                None => return Ok(()),
            },
        }
    }
}

fn log_finished(joined: Result<DispatchOutcome, JoinError>) {
    if let Err(e) = joined {
        if e.is_panic() {
            warn!("Message task panicked: {}", e);
        }
    }
}
