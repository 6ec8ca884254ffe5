use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use sse_tap::cli::{parse_args, run_cli_command};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // stdout carries the tapped body, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sse_tap=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    run_cli_command(parse_args(std::env::args())).await
}
