//! Command-line argument parsing for the sse-tap CLI.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Fetch `url` through the tap
    Tap { url: String, json: bool },
    /// Arguments could not be parsed
    Invalid(String),
}

/// Usage text printed for `--help` and on invalid arguments.
pub const USAGE: &str = "usage: sse-tap [--json] [--version] <url>";

/// Parse command-line arguments and return the appropriate command.
///
/// `--version` and `--help` win over everything else. Otherwise exactly one
/// positional URL is required.
///
/// # Examples
///
/// ```
/// use sse_tap::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["sse-tap".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut json = false;
    let mut url: Option<String> = None;

    // Skip the program name
    for arg in args.skip(1) {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--json" => json = true,
            flag if flag.starts_with('-') => {
                return CliCommand::Invalid(format!("unknown flag: {}", flag));
            }
            _ => {
                if url.is_some() {
                    return CliCommand::Invalid(format!("unexpected argument: {}", arg));
                }
                url = Some(arg);
            }
        }
    }

    match url {
        Some(url) => CliCommand::Tap { url, json },
        None => CliCommand::Invalid("missing <url>".to_string()),
    }
}
