//! Print the most popular C++ repositories, one `owner/name` per line.
//!
//! The output feeds straight into `algostat` or `algostat-enqueue-jobs`.

use std::io::IsTerminal;

use tokio::io::AsyncWriteExt;

use algostat::core::logging::init_logging;
use algostat::github::RepoSearch;

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
    let mut search = RepoSearch::new()?;
    let mut stdout = tokio::io::stdout();

    while let Some(page) = search.next_page().await? {
        for name in page {
            stdout.write_all(format!("{}\n", name).as_bytes()).await?;
        }
        stdout.flush().await?;
    }

    Ok(())
}
