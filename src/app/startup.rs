//! Application Startup
//!
//! Wires the CLI surface to the pipeline: logging, runtime construction,
//! job-source/result-sink pairing, and exit-status mapping. Exit status is
//! 0 on normal completion or graceful interruption; non-zero only for
//! configuration and startup failures.

use clap::Parser;

use crate::app::cli::Args;
use crate::core::logging::init_logging;
use crate::core::shutdown::ShutdownCoordinator;
use crate::queue::{QueueConfig, RedisQueue};
use crate::scanner::coordinator::WorkCoordinator;
use crate::scanner::sink::{QueueResultSink, ResultSink, StreamResultSink};
use crate::scanner::source::{JobSource, QueueJobSource, StreamJobSource};

/// Environment toggle mirroring the `-v` flag
pub const VERBOSE_ENV: &str = "ALGOSTAT_VERBOSE";

pub fn startup() -> i32 {
    let args = Args::parse();
    let verbose = args.verbose || std::env::var_os(VERBOSE_ENV).is_some();

    if let Err(e) = init_logging(
        args.effective_log_level(verbose),
        args.log_format.as_deref(),
        args.log_file.as_deref(),
        args.use_color(),
    ) {
        eprintln!("failed to initialise logging: {}", e);
        return 1;
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("failed to start runtime: {}", e);
            return 1;
        }
    };

    runtime.block_on(run(&args))
}

async fn run(args: &Args) -> i32 {
    let shutdown = ShutdownCoordinator::install();
    let coordinator = WorkCoordinator::new(args.threads);

    log::debug!(
        "starting with {} workers ({} mode)",
        args.threads,
        if args.rq { "queue" } else { "stream" }
    );

    let summary = if args.rq {
        let config = match QueueConfig::from_env() {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                return 2;
            }
        };
        let queue = match RedisQueue::connect(&config).await {
            Ok(queue) => queue,
            Err(e) => {
                log::error!("cannot reach queue at {}: {}", config.url(), e);
                return 2;
            }
        };
        let source: Box<dyn JobSource> = Box::new(QueueJobSource::new(queue.clone()));
        let sink: Box<dyn ResultSink> = Box::new(QueueResultSink::new(queue));
        coordinator.run(source, sink, &shutdown).await
    } else {
        let source: Box<dyn JobSource> = Box::new(StreamJobSource::new(tokio::io::stdin()));
        let sink: Box<dyn ResultSink> = Box::new(StreamResultSink::new(tokio::io::stdout()));
        coordinator.run(source, sink, &shutdown).await
    };

    if summary.interrupted {
        log::debug!("shutdown requested; partial totals were flushed");
    }
    0
}
