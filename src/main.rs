use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{CommandFactory, FromArgMatches, Parser};
use ontalign::command::AlignCMD;
use ontalign::runtime::{self, Commands, LogLevel, LogMode};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    //Without a subcommand, the align options are accepted directly
    #[command(flatten)]
    align: AlignCMD,

    #[arg(long = "log-level", global = true, default_value = "info")]
    /// trace, debug, info, warn, error or off. RUST_LOG overrides
    log_level: LogLevel,

    #[arg(long = "log-mode", global = true, default_value = "terminal")]
    /// terminal (stderr), path (append to --log-path) or discard
    log_mode: LogMode,

    #[arg(long = "log-path", global = true, default_value = runtime::DEFAULT_LOG_PATH)]
    log_path: PathBuf,
}

/// Parse the command line. Top-level align options only make sense without a subcommand,
/// while the global log options may go anywhere
fn parse_cli<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut cmd = Cli::command();
    let matches = cmd.try_get_matches_from_mut(args)?;

    if let Some((name, _)) = matches.subcommand() {
        let misplaced: Vec<String> = cmd
            .get_arguments()
            .filter(|a| !a.is_global_set())
            .filter(|a| matches.value_source(a.get_id().as_str()) == Some(ValueSource::CommandLine))
            .map(|a| a.to_string())
            .collect();
        if !misplaced.is_empty() {
            let msg = format!(
                "{} must come after the subcommand '{}'",
                misplaced.join(", "),
                name
            );
            return Err(cmd.error(ErrorKind::ArgumentConflict, msg));
        }
    }

    Cli::from_arg_matches(&matches).map_err(|e| e.format(&mut cmd))
}

fn main() -> ExitCode {
    let cli = match parse_cli(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    if let Err(e) = runtime::setup_global_logger(cli.log_level, cli.log_mode, cli.log_path) {
        eprintln!("Warning: logging is disabled: {:#}", e);
    }

    let command = cli.command.unwrap_or(Commands::Align(cli.align));
    log::debug!("Running command {:?}", command);

    let result = match command {
        Commands::Align(mut cmd) => cmd.try_execute(),
        Commands::Plan(mut cmd) => cmd.try_execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
