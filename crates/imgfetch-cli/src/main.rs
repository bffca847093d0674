use clap::Parser;
use imgfetch_core::control::CancelToken;
use imgfetch_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging as early as possible.
    if cli.log_file {
        if let Err(err) = logging::init_logging_file(cli.verbose) {
            logging::init_logging_stderr(cli.verbose);
            tracing::warn!("file logging unavailable ({:#}); logging to stderr", err);
        }
    } else {
        logging::init_logging_stderr(cli.verbose);
    }

    // Ctrl-C stops the batch; in-flight transfers drop their partial files.
    let cancel = CancelToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling remaining downloads");
            on_signal.cancel();
        }
    });

    match cli.run(cancel).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("imgfetch error: {:#}", err);
            std::process::exit(1);
        }
    }
}
