//! Command-line front end: run one query and print the digest.
//!
//! ```text
//! search-digest [--text] [--config FILE] [--model PATH] [--widen] <QUERY...>
//! ```
//!
//! Logs go to stderr (`RUST_LOG`, default `info`); the digest goes to stdout.
//! Ctrl-C cancels the run.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use search_digest::{Error, Options, Pipeline, QueryWidening};
use tokio_util::sync::CancellationToken;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "search-digest")]
#[command(about = "Search the web and print a digest of the best passages", version)]
struct Cli {
    /// Print plain text instead of HTML
    #[arg(long)]
    text: bool,

    /// JSON options file; missing fields keep their defaults
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Local GGUF model used for the generative summary
    #[arg(long, value_name = "PATH", env = "SEARCH_DIGEST_MODEL")]
    model: Option<PathBuf>,

    /// Add site: filters for technology sites to technical queries
    #[arg(long)]
    widen: bool,

    /// The query; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,
}

fn load_options(cli: &Cli) -> search_digest::Result<Options> {
    let mut options = match &cli.config {
        Some(path) => Options::from_json_file(path)?,
        None => Options::default(),
    };
    if cli.model.is_some() {
        options.model_path.clone_from(&cli.model);
    }
    if cli.widen {
        options.query_widening = QueryWidening::TechSites;
    }
    Ok(options)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let query = cli.query.join(" ");

    let pipeline = match load_options(&cli).and_then(Pipeline::from_options) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            error!(error = %e, "could not start");
            return ExitCode::FAILURE;
        }
    };

    let token = CancellationToken::new();
    let on_interrupt = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    match pipeline.run_with_cancel(&query, token).await {
        Ok(digest) => {
            let rendered = if cli.text {
                digest.render_text()
            } else {
                digest.render_html()
            };
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(e @ Error::Validation(_)) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
        Err(e) if e.is_empty_result() => {
            eprintln!("No results found for \"{}\": {e}", query.trim());
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %e, "digest run failed");
            ExitCode::FAILURE
        }
    }
}
