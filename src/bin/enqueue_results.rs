//! Append result lines from stdin to the remote results list.

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
        let result = line.trim();
        if result.is_empty() {
            continue;
        }
        stdout.write_all(format!("{}\n", result).as_bytes()).await?;
        stdout.flush().await?;
        queue.push_result(result).await?;
    }

    Ok(())
}
