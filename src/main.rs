use clap::Parser;
use tracing_subscriber::EnvFilter;

use tr_dropout::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag; RUST_LOG overrides both
    let default_filter = if cli.verbose {
        "tr_dropout=debug,info"
    } else {
        "tr_dropout=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Logs go to stderr so the report on stdout stays machine-parseable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    cli::run(&cli)
}
