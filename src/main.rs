// src/main.rs

use amon::errors::AmonError;
use amon::{cli, logging, run};

#[tokio::main]
async fn main() {
    match run_main().await {
        // The stdin listener sits on a blocking read; exit explicitly so the
        // runtime does not wait on it.
        Ok(()) => std::process::exit(0),
        Err(AmonError::MissingCommand) => {
            cli::print_usage();
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("amon error: {err}");
            std::process::exit(1);
        }
    }
}

async fn run_main() -> amon::errors::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await
}
