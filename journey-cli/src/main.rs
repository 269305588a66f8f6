use anyhow::Result;
use clap::{Parser, Subcommand};
use journey_cli::Settings;
use tracing_subscriber::EnvFilter;

/// Model-based checkout journeys
#[derive(Parser)]
#[command(name = "journey", version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output and debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the journey property against the basket service
    #[command(alias = "c")]
    Check {
        #[command(flatten)]
        settings: Settings,
    },

    /// Replay a failure from the data printed with it
    Recheck {
        /// Recheck data, `size_state_gamma_path`
        data: String,

        #[command(flatten)]
        settings: Settings,
    },

    /// Print one generated journey as JSON
    Sample {
        #[command(flatten)]
        settings: Settings,

        /// Generation size
        #[arg(long, default_value_t = 30)]
        size: usize,
    },
}

fn main() -> Result<()> {
    // Enable colors only when running in a terminal or explicitly requested
    let should_use_colors = atty::is(atty::Stream::Stdout)
        || std::env::var("FORCE_COLOR").is_ok()
        || (std::env::var("NO_COLOR").is_err()
            && std::env::var("TERM").unwrap_or_default() != "dumb");

    colored::control::set_override(should_use_colors);

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        Commands::Check { settings } => run_check(&settings, cli.verbose),
        Commands::Recheck { data, settings } => run_recheck(&settings, &data, cli.verbose),
        Commands::Sample { settings, size } => {
            let journey = journey_cli::sample(&settings, size)?;
            println!("{}", serde_json::to_string_pretty(&journey)?);
            Ok(())
        }
    }
}

fn run_check(settings: &Settings, verbose: bool) -> Result<()> {
    println!("{}", journey_cli::format_header());
    if verbose {
        println!("{}", journey_cli::format_config_output(settings));
    }

    let result = journey_cli::check(settings)?;
    report(settings, &result)
}

fn run_recheck(settings: &Settings, data: &str, verbose: bool) -> Result<()> {
    if verbose {
        println!("{}", journey_cli::format_config_output(settings));
    }

    let result = journey_cli::recheck(settings, data)?;
    report(settings, &result)
}

fn report(settings: &Settings, result: &journey::TestResult) -> Result<()> {
    print!("{}", journey_cli::format_result(result));
    if let Some(command) = journey_cli::format_recheck_command(settings, result) {
        println!();
        print!("{command}");
    }
    if result.is_fail() {
        std::process::exit(1);
    }
    Ok(())
}
