//! fastroute: small text exercises over standard input.
//!
//! The default subcommand reads `<source> <destination> <weight>` lines and
//! prints the cheapest route cost from HOME to DEST. The other subcommands
//! are independent line filters (expenses, chord transposition, digit-string
//! addition). Results go to stdout, logs to stderr.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod config;
mod digits;
mod expenses;
mod input;
mod load;
mod route;
mod transpose;

use config::{FrontierKind, OutputFormat, Overrides, Settings, Weekday};

#[derive(Parser)]
#[command(name = "fastroute")]
#[command(author, version, about = "Stdin text exercises: cheapest route, expenses, chords, big sums", long_about = None)]
struct Cli {
    /// TOML settings file (flags override its values)
    #[arg(long, global = true, value_name = "PATH", env = "FASTROUTE_CONFIG")]
    config: Option<PathBuf>,

    /// tracing filter for stderr logs, e.g. "debug" (default: RUST_LOG, then "warn")
    #[arg(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Cheapest route cost over `<source> <destination> <weight>` lines (default)
    Route(RouteArgs),

    /// Per-category expense totals over lines of `f12 g3 ...` tokens
    Expenses,

    /// Expense totals per weekday, one line per day
    ExpensesByDay {
        /// Weekday of the first input line
        #[arg(long, value_enum)]
        first_day: Option<Weekday>,
    },

    /// Shift every chord up a whole tone
    Transpose,

    /// Sum one arbitrary-length decimal number per line
    Add,
}

#[derive(Args, Default)]
struct RouteArgs {
    /// Start node name (default: HOME)
    #[arg(long)]
    start: Option<String>,

    /// Target node name (default: DEST)
    #[arg(long)]
    target: Option<String>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Frontier selection strategy
    #[arg(long, value_enum)]
    frontier: Option<FrontierKind>,
}

fn init_logging(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log filter '{}'", directive))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    Ok(())
}

/// Write the command result in one go. A closed pipe surfaces as an error
/// instead of a panic.
fn write_output<W: Write>(mut out: W, text: &str) -> Result<()> {
    out.write_all(text.as_bytes()).context("failed to write output")?;
    out.flush().context("failed to flush output")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Route(RouteArgs::default()));

    let mut overrides = Overrides {
        log_level: cli.log_level,
        ..Overrides::default()
    };
    match &command {
        Commands::Route(args) => {
            overrides.start_node = args.start.clone();
            overrides.target_node = args.target.clone();
            overrides.format = args.format;
            overrides.frontier = args.frontier;
        }
        Commands::ExpensesByDay { first_day } => overrides.first_day = *first_day,
        _ => {}
    }

    let settings = Settings::load(cli.config.as_deref())?.apply(overrides);
    init_logging(settings.log_level.as_deref())?;
    tracing::debug!(?settings, "settings resolved");

    let lines = input::read_lines(std::io::stdin().lock())?;

    let output = match command {
        Commands::Route(_) => {
            let report = route::find_route(
                &lines,
                &settings.start_node,
                &settings.target_node,
                settings.frontier.into(),
            )?;
            let mut text = report.render(settings.format)?;
            text.push('\n');
            text
        }
        Commands::Expenses => expenses::render_summary(&expenses::summarize(&lines)),
        Commands::ExpensesByDay { .. } => {
            expenses::render_by_day(&expenses::summarize_by_day(&lines, settings.first_day))
        }
        Commands::Transpose => transpose::transpose_lines(&lines),
        Commands::Add => {
            let mut total = digits::sum_lines(&lines)?;
            total.push('\n');
            total
        }
    };

    write_output(std::io::stdout().lock(), &output)
}
