use std::path::Path;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use endpoint_hunter::config::Config;
use endpoint_hunter::fetch::HttpFetcher;
use endpoint_hunter::output::ConsoleSink;
use endpoint_hunter::scan::scan_and_save;

const DEFAULT_LOG_FILTER: &str = "endpoint_hunter=warn,reqwest=info,hyper=info,h2=info";

fn init_logging() {
    // RUST_LOG wins; otherwise only our warnings, with HTTP internals held at INFO.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .init();
}

pub async fn run_from_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env();
    tracing::info!(url = %cli.url, output = %cli.output, concurrency = config.concurrency, timeout = config.timeout_secs, "Starting scan");

    let sink = ConsoleSink::new();
    sink.banner(&cli.url, &cli.output);

    let fetcher = HttpFetcher::new(&config).context("failed to build HTTP client")?;
    // a seed failure has already been reported through the sink
    scan_and_save(&cli.url, &fetcher, &sink, config.concurrency, Path::new(&cli.output)).await?;
    Ok(())
}
