use clap::Parser;
use symbol_cli::commands::Cmd;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG controls verbosity; diagnostics go to stderr so outcomes on
    // stdout stay scriptable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    Cmd::parse().execute().await
}
