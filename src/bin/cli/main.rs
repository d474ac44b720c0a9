mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand};
use output::{OutputConfig, OutputFormat};
use quizmaster::config::{self, CliArgs};
use quizmaster::logging;
use std::process;

/// Terminal front end for the Quizmaster engine
#[derive(Parser, Debug)]
#[command(name = "quizmaster", about = "Run quizzes from JSON question sets", version)]
struct Cli {
    /// Output format for reports and listings
    #[arg(long, value_enum, default_value_t = OutputFormat::Human, global = true)]
    format: OutputFormat,

    /// Quiet mode: minimal output (just counts)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(flatten)]
    config: CliArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a quiz interactively
    Run(commands::run::RunArgs),
    /// List the questions of a question set
    Inspect(commands::inspect::InspectArgs),
}

#[tokio::main]
async fn main() {
    // Environment variables feed the clap `env` fallbacks, so load them first
    if std::fs::metadata(".env").is_ok() {
        dotenv::dotenv().ok();
    }

    let cli = Cli::parse();
    let debug = cli.config.debug;
    let config = config::get_config(cli.config);

    let _log_guard = match logging::init_logging(debug, config.log_dir.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Warning: {:#}", e);
            None
        }
    };

    let output_config = OutputConfig {
        format: cli.format,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(args, &config, &output_config).await,
        Commands::Inspect(args) => commands::inspect::execute(args, &output_config).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
