use llamit_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; stderr if the state dir is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and dispatch.
    if let Err(err) = Cli::run_from_args().await {
        tracing::error!("{:#}", err);
        eprintln!("llamit error: {:#}", err);
        std::process::exit(1);
    }
    tracing::info!("llamit finished successfully");
}
