//! Version command for the sse-tap CLI.

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Handle the --version command.
pub fn handle_version_command() -> ! {
    println!("sse-tap {}", VERSION);
    std::process::exit(0)
}
