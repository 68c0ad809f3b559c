use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::debug;
use spikecount::command::Commands;
use spikecount::runtime;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long = "log-level", global = true, default_value = "info")]
    /// trace, debug, info, warn, error or off
    log_level: runtime::LogLevel,

    #[arg(long = "log-mode", global = true, default_value = "terminal")]
    /// terminal, path or discard
    log_mode: runtime::LogMode,

    #[arg(long = "log-path", global = true, default_value = "spikecount.log")]
    /// Log file, used with --log-mode path
    log_path: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = runtime::setup_global_logger(cli.log_level, cli.log_mode, &cli.log_path) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    debug!("Running {:?}", cli.command);

    let result = match cli.command {
        Commands::Count(mut cmd) => cmd.try_execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
