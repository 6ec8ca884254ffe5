//! CLI module for sse-tap.
//!
//! # Usage
//!
//! ```ignore
//! use sse_tap::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! run_cli_command(command).await?;
//! ```

pub mod args;
pub mod tap;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use tap::{handle_tap_command, render_signal, tap_url};
pub use version::{handle_version_command, VERSION};

use color_eyre::eyre::eyre;
use color_eyre::Result;

/// Run a parsed CLI command.
///
/// `Version` never returns as it calls `std::process::exit(0)`.
pub async fn run_cli_command(command: CliCommand) -> Result<()> {
    match command {
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        CliCommand::Tap { url, json } => handle_tap_command(&url, json).await,
        CliCommand::Invalid(reason) => Err(eyre!("{}\n{}", reason, USAGE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_command_is_error() {
        let result = run_cli_command(CliCommand::Invalid("missing <url>".to_string())).await;
        let message = result.unwrap_err().to_string();
        assert!(message.contains("missing <url>"));
        assert!(message.contains(USAGE));
    }

    #[tokio::test]
    async fn test_help_is_ok() {
        assert!(run_cli_command(CliCommand::Help).await.is_ok());
    }
}
