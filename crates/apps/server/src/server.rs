use crate::config::Config;
use crate::logging::LogFile;
use crate::metrics::{start_metrics_reporter, ServerMetrics};
use crate::routes::router;
use anyhow::Context;
use cube::CubeService;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Shared state handed to every request handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub cube: Arc<CubeService>,
    pub metrics: Arc<ServerMetrics>,
    /// Upper bound on a single generation
    pub timeout: Duration,
}

impl AppState {
    pub fn new(cube: Arc<CubeService>, timeout: Duration) -> Self {
        Self {
            cube,
            metrics: Arc::new(ServerMetrics::default()),
            timeout,
        }
    }
}

/// Bind and serve until SIGTERM or Ctrl-C
pub async fn run(
    config: &Config,
    cube: Arc<CubeService>,
    log_file: Option<LogFile>,
) -> anyhow::Result<()> {
    let state = AppState::new(cube, config.server.timeout());

    if config.server.metrics_interval > 0 {
        tokio::spawn(start_metrics_reporter(
            Arc::clone(&state.metrics),
            Duration::from_secs(config.server.metrics_interval),
        ));
    }

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(log_file))
    .await
    .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

/// Resolves on SIGTERM or Ctrl-C. SIGHUP reopens the log file and keeps waiting.
async fn shutdown_signal(log_file: Option<LogFile>) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let (mut hangup, mut terminate) =
            match (signal(SignalKind::hangup()), signal(SignalKind::terminate())) {
                (Ok(hangup), Ok(terminate)) => (hangup, terminate),
                (Err(e), _) | (_, Err(e)) => {
                    tracing::error!("failed to install signal handlers: {}", e);
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };

        loop {
            tokio::select! {
                _ = hangup.recv() => reopen_log(log_file.as_ref()),
                _ = terminate.recv() => break,
                _ = tokio::signal::ctrl_c() => break,
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = log_file;
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("shutting down");
}

#[cfg_attr(not(unix), allow(dead_code))]
fn reopen_log(log_file: Option<&LogFile>) {
    let Some(log_file) = log_file else {
        return;
    };
    match log_file.reopen() {
        Ok(()) => tracing::info!(path = %log_file.path().display(), "reopened log file"),
        Err(e) => tracing::error!(path = %log_file.path().display(), "failed to reopen log file: {}", e),
    }
}
