use clap::Parser;
use std::ffi::OsString;

/// Program launched by the binary.
pub const WRAPPED_PROGRAM: &str = "adb";

pub const USAGE_HINT: &str = "colorcat usage: just like normal adb ;)";

/// Immutable configuration used by the application runtime
#[derive(Debug, Clone)]
pub struct Config {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub show_usage: bool,
}

/// User-facing CLI arguments (kept private to the CLI layer).
///
/// colorcat has no flags of its own, everything is handed to the wrapped tool.
#[derive(Parser, Debug)]
#[command(
    name = "colorcat",
    about = "Colorize adb output by log level",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    /// Arguments forwarded verbatim to adb
    #[arg(value_name = "ADB_ARGS", num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
    forwarded: Vec<OsString>,
}

/// Parse the process arguments into an application Config
pub fn parse() -> Config {
    parse_from(std::env::args_os())
}

pub fn parse_from<I, T>(argv: I) -> Config
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    let mut args = Args::parse_from(&argv).forwarded;

    // clap swallows a leading `--` as its own end-of-options marker
    if argv.get(1).is_some_and(|first| first == "--") {
        args.insert(0, OsString::from("--"));
    }

    Config {
        program: OsString::from(WRAPPED_PROGRAM),
        show_usage: args.is_empty(),
        args,
    }
}
