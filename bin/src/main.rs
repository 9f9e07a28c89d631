//! chicama CLI - Historical OHLCV bar fetcher.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "chicama")]
#[command(about = "Historical OHLCV bar fetcher", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch historical bars by replaying a captured provider session
    Fetch {
        /// Contract symbol (e.g., spy, vix)
        symbol: String,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        to: Option<String>,

        /// Capture directory with recorded provider batches
        #[arg(short, long)]
        capture: PathBuf,

        /// Bar size (1min, 5min, 15min, 30min, 1hour, 1day)
        #[arg(short, long, default_value = "1min")]
        bar_size: String,

        /// Price field (trades, midpoint, bid, ask)
        #[arg(long, default_value = "trades")]
        field: String,

        /// Output file path. Defaults to SYMBOL-CURRENCY-EXCHANGE-BARSIZE.<format>
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Stop after the first delivered batch
        #[arg(long)]
        single_batch: bool,

        /// Mark synthesized gap-fill rows with an extra CSV column
        #[arg(long)]
        mark_synthesized: bool,

        /// Date treated as today for pagination (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<String>,

        /// Seconds to wait for the next bar before aborting
        #[arg(long, default_value = "60")]
        stall_timeout: u64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show the request plan for a window without fetching
    Plan {
        /// Contract symbol (e.g., spy, vix)
        symbol: String,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        to: Option<String>,

        /// Bar size (1min, 5min, 15min, 30min, 1hour, 1day)
        #[arg(short, long, default_value = "1min")]
        bar_size: String,

        /// Date treated as today for pagination (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<String>,
    },

    /// List known contracts
    Contracts {
        /// Filter by security type (stock, index)
        #[arg(short = 't', long)]
        security_type: Option<String>,

        /// Search pattern
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show contract details
    Info {
        /// Contract symbol
        symbol: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Fetch {
            symbol,
            from,
            to,
            capture,
            bar_size,
            field,
            output,
            format,
            single_batch,
            mark_synthesized,
            as_of,
            stall_timeout,
            yes,
        } => {
            commands::fetch::fetch(
                &symbol,
                &from,
                to.as_deref(),
                &capture,
                &bar_size,
                &field,
                output,
                format,
                single_batch,
                mark_synthesized,
                as_of.as_deref(),
                stall_timeout,
                yes,
                cli.quiet,
            )
            .await
        }
        Commands::Plan {
            symbol,
            from,
            to,
            bar_size,
            as_of,
        } => commands::plan::show_plan(
            &symbol,
            &from,
            to.as_deref(),
            &bar_size,
            as_of.as_deref(),
        ),
        Commands::Contracts {
            security_type,
            search,
        } => commands::contracts::list_contracts(security_type.as_deref(), search.as_deref()),
        Commands::Info { symbol } => commands::info::show_info(&symbol),
    }
}
