use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Request counters shared by all handlers
#[derive(Debug, Default)]
pub struct ServerMetrics {
    pub requests: AtomicU64,
    pub cubes_generated: AtomicU64,
    pub requests_rejected: AtomicU64,
    pub generation_failures: AtomicU64,
    pub bytes_sent: AtomicU64,
}

impl ServerMetrics {
    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_generated(&self, bytes: usize) {
        self.cubes_generated.fetch_add(1, Ordering::Relaxed);
        self.bytes_sent.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.requests_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.generation_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get Prometheus-compatible metrics as a string
    pub fn to_prometheus(&self) -> String {
        format!(
            "# HELP cube_requests Total cube requests received\n\
             # TYPE cube_requests counter\n\
             cube_requests {}\n\
             \n\
             # HELP cubes_generated Total cubes generated\n\
             # TYPE cubes_generated counter\n\
             cubes_generated {}\n\
             \n\
             # HELP requests_rejected Total requests rejected by validation\n\
             # TYPE requests_rejected counter\n\
             requests_rejected {}\n\
             \n\
             # HELP generation_failures Total failed or timed out generations\n\
             # TYPE generation_failures counter\n\
             generation_failures {}\n\
             \n\
             # HELP bytes_sent Total body bytes sent\n\
             # TYPE bytes_sent counter\n\
             bytes_sent {}\n",
            self.requests.load(Ordering::Relaxed),
            self.cubes_generated.load(Ordering::Relaxed),
            self.requests_rejected.load(Ordering::Relaxed),
            self.generation_failures.load(Ordering::Relaxed),
            self.bytes_sent.load(Ordering::Relaxed),
        )
    }

    /// Print metrics to the log
    pub fn print_stats(&self) {
        tracing::info!(
            "Requests: {} | Generated: {} | Rejected: {} | Failed: {} | Bytes Sent: {}",
            self.requests.load(Ordering::Relaxed),
            self.cubes_generated.load(Ordering::Relaxed),
            self.requests_rejected.load(Ordering::Relaxed),
            self.generation_failures.load(Ordering::Relaxed),
            self.bytes_sent.load(Ordering::Relaxed),
        );
    }
}

/// Start metrics reporting task
pub async fn start_metrics_reporter(metrics: Arc<ServerMetrics>, period: Duration) {
    let mut interval = tokio::time::interval(period);
    // first tick completes immediately
    interval.tick().await;

    loop {
        interval.tick().await;
        metrics.print_stats();
    }
}
