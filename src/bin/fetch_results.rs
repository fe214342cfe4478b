//! Drain the remote results list to stdout, one line per result.

use std::io::IsTerminal;

use tokio::io::AsyncWriteExt;

use algostat::core::logging::init_logging;
use algostat::queue::{QueueConfig, RedisQueue};

#[tokio::main]
async fn main() {
    if let Err(e) = init_logging("info", None, None, std::io::stderr().is_terminal()) {
        eprintln!("failed to initialise logging: {}", e);
        std::process::exit(1);
    }
    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = QueueConfig::from_env()?;
    let mut queue = RedisQueue::connect(&config).await?;

    let mut stdout = tokio::io::stdout();
    while queue.result_count().await? > 0 {
        if let Some(result) = queue.pop_result().await? {
            stdout.write_all(format!("{}\n", result).as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    Ok(())
}
