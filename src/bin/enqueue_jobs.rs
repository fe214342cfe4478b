//! Append job entries from stdin to the remote jobs list.
//!
//! Each non-empty trimmed line is echoed to stdout and pushed to the tail
//! of the jobs list, so the tool can sit in the middle of a shell pipeline.

use std::io::IsTerminal;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

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

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let name = line.trim();
        if name.is_empty() {
            continue;
        }
        stdout.write_all(format!("{}\n", name).as_bytes()).await?;
        stdout.flush().await?;
        queue.push_job(name).await?;
    }

    Ok(())
}
