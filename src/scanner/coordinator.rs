//! Work Coordinator
//!
//! Bounded-concurrency driver: N workers pull descriptors from one shared
//! job source, run the acquire/select/aggregate cycle, emit non-empty
//! results, and fold per-worker partial totals into the corpus-wide total.
//! One bad repository never aborts the run; failures are contained at this
//! boundary and reported on the error channel.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::analysis::AlgorithmCounts;
use crate::core::shutdown::ShutdownCoordinator;

use super::aggregate::scan_repository;
use super::checkout::checkout;
use super::error::{ScanError, ScanResult};
use super::sink::ResultSink;
use super::source::JobSource;
use super::types::{RepoDescriptor, ResultRecord};

/// Default number of concurrent repository analyses
pub const DEFAULT_WORKERS: usize = 4;

type SharedSource = Arc<Mutex<Box<dyn JobSource>>>;
type SharedSink = Arc<Mutex<Box<dyn ResultSink>>>;

/// What a finished (or interrupted) run looked like
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Repositories analyzed to completion
    pub processed: usize,
    /// Repositories skipped after a contained failure
    pub failed: usize,
    /// Whether the run stopped on a shutdown request
    pub interrupted: bool,
    /// Corpus-wide fold of every repository's counts
    pub totals: AlgorithmCounts,
}

#[derive(Default)]
struct WorkerReport {
    processed: usize,
    failed: usize,
    totals: AlgorithmCounts,
}

/// Bounded-concurrency pipeline driver
pub struct WorkCoordinator {
    workers: usize,
}

impl WorkCoordinator {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// Process every descriptor the source yields, at most `workers` at a
    /// time, and emit non-empty results to `sink`
    ///
    /// On interruption the workers stop pulling new descriptors, in-flight
    /// analyses finish (their cleanup always runs), and the totals
    /// accumulated so far are flushed to the summary channel.
    pub async fn run(
        &self,
        source: Box<dyn JobSource>,
        sink: Box<dyn ResultSink>,
        shutdown: &ShutdownCoordinator,
    ) -> RunSummary {
        let source: SharedSource = Arc::new(Mutex::new(source));
        let sink: SharedSink = Arc::new(Mutex::new(sink));

        let mut handles = Vec::with_capacity(self.workers);
        for worker_id in 0..self.workers {
            let source = source.clone();
            let sink = sink.clone();
            let shutdown = shutdown.clone();
            handles.push(tokio::spawn(worker_loop(worker_id, source, sink, shutdown)));
        }

        let mut summary = RunSummary::default();
        for joined in futures::future::join_all(handles).await {
            match joined {
                Ok(report) => {
                    summary.processed += report.processed;
                    summary.failed += report.failed;
                    summary.totals.merge(&report.totals);
                }
                Err(e) => log::error!("worker task failed: {}", e),
            }
        }
        summary.interrupted = shutdown.is_shutdown_requested();

        flush_summary(&summary);
        summary
    }
}

// The corpus-wide total goes to the summary channel (the log stream), never
// to the result sink, so per-repository output stays machine-parseable.
fn flush_summary(summary: &RunSummary) {
    let outcome = if summary.interrupted {
        "interrupted"
    } else {
        "complete"
    };
    log::info!(
        "run {}: {} repositories analyzed, {} failed",
        outcome,
        summary.processed,
        summary.failed
    );
    if !summary.totals.is_empty() {
        log::info!("corpus totals: {}", summary.totals.format_ranked());
    }
}

async fn worker_loop(
    worker_id: usize,
    source: SharedSource,
    sink: SharedSink,
    shutdown: ShutdownCoordinator,
) -> WorkerReport {
    let mut report = WorkerReport::default();
    let mut shutdown_rx = shutdown.subscribe();

    loop {
        // Cooperative cancellation point: observed between work items only.
        if shutdown.is_shutdown_requested() {
            break;
        }

        // A fetch that is already complete wins over a simultaneous
        // shutdown signal; the signal's job is to interrupt fetches blocked
        // on a quiet input stream or queue.
        let next = tokio::select! {
            biased;
            next = next_job(&source) => next,
            _ = shutdown_rx.recv() => break,
        };

        let mut repo = match next {
            Ok(Some(repo)) => repo,
            Ok(None) => break,
            Err(e) => {
                log::error!("job source failed: {}", e);
                break;
            }
        };

        log::debug!("worker {} analyzing {}", worker_id, repo.name());

        match analyze_repository(&mut repo).await {
            Ok(counts) => {
                report.processed += 1;
                if let Some(record) = ResultRecord::from_counts(repo.name(), &counts) {
                    if let Err(e) = sink.lock().await.emit(&record).await {
                        log::error!("{}: emitting result failed: {}", repo.name(), e);
                    }
                }
                report.totals.merge(&counts);
            }
            Err(e) => {
                report.failed += 1;
                log::error!("{}: {}", repo.name(), e);
            }
        }
    }

    report
}

async fn next_job(source: &SharedSource) -> ScanResult<Option<RepoDescriptor>> {
    source.lock().await.next_job().await
}

/// One acquisition cycle: scoped clone, walk, count
///
/// The checkout guard is dropped on every path out of this function, so the
/// temporary working tree is removed whether the scan succeeds or not.
async fn analyze_repository(repo: &mut RepoDescriptor) -> ScanResult<AlgorithmCounts> {
    let guard = checkout(repo).await?;
    let root = guard.path().to_path_buf();

    // The walk-and-count step is CPU and filesystem bound.
    let counts = tokio::task::spawn_blocking(move || scan_repository(&root))
        .await
        .map_err(|e| ScanError::Io(std::io::Error::new(std::io::ErrorKind::Other, e.to_string())))?;

    Ok(counts)
}
