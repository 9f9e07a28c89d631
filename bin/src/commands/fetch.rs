//! Fetch command implementation.
//!
//! This module drives a full fetch session: it plans the request walk,
//! confirms expensive fetches, replays the captured provider session,
//! and writes normalized rows to the chosen output format.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use inquire::Confirm;

use chicama_lib::prelude::*;

use crate::display::{self, Format};

/// Fetch historical bars for a contract.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn fetch(
    symbol: &str,
    from_str: &str,
    to_str: Option<&str>,
    capture: &Path,
    bar_size_str: &str,
    field_str: &str,
    output: Option<PathBuf>,
    format: Format,
    single_batch: bool,
    mark_synthesized: bool,
    as_of_str: Option<&str>,
    stall_timeout_secs: u64,
    yes: bool,
    quiet: bool,
) -> Result<()> {
    // Lookup contract
    let registry = ContractRegistry::global();
    let contract = registry
        .get(symbol)
        .with_context(|| format!("Unknown symbol: {symbol}"))?
        .clone();

    let from = display::parse_date(from_str, "from")?;
    let to = match to_str {
        Some(s) => display::parse_date(s, "to")?,
        None => chrono::Utc::now().date_naive(),
    };
    let window = FetchWindow::new(from, to)?;

    let bar_size = bar_size_str
        .parse::<BarSize>()
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    let field = field_str
        .parse::<BarField>()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    // Pagination decisions run against --as-of when replaying old captures
    let (clock, as_of) = match as_of_str {
        Some(s) => {
            let date = display::parse_date(s, "as-of")?;
            let noon = date.and_hms_opt(12, 0, 0).expect("valid time");
            (Clock::Fixed(Utc.from_utc_datetime(&noon)), date)
        }
        None => (Clock::System, chrono::Utc::now().date_naive()),
    };

    // Show the plan and confirm multi-request walks
    let plan = chicama_estimate::plan(window, bar_size, as_of);
    if !yes && !quiet && plan.requests.len() > 1 {
        println!("Fetch plan for {}:", contract.symbol());
        println!("{}", plan.summary());
        println!();
        let proceed = Confirm::new("Proceed with fetch?")
            .with_default(true)
            .prompt()?;
        if !proceed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    // Determine output path (default to SYMBOL-CURRENCY-EXCHANGE-BARSIZE.<format>)
    let output = output.unwrap_or_else(|| {
        PathBuf::from(default_file_name(&contract, bar_size, format.to_output()))
    });

    let source = ReplaySource::open(capture)
        .with_context(|| format!("Cannot open capture directory: {}", capture.display()))?;
    let sink = display::make_sink(&output, format, mark_synthesized)?;

    // Ctrl-C cancels between bars instead of tearing the process down
    let cancel = CancelToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let progress = display::session_spinner(
        quiet,
        format!("{} {} to {}", contract.symbol(), window.from, window.to),
    );

    let session = FetchSession::new(source, sink, contract, bar_size, field, window)
        .with_continue_until_complete(!single_batch)
        .with_clock(clock)
        .with_cancel_token(cancel)
        .with_stall_timeout(Duration::from_secs(stall_timeout_secs));

    let summary = match session.run().await {
        Ok(summary) => summary,
        Err(e) => {
            progress.finish_and_clear();
            return Err(e.into());
        }
    };
    progress.finish_with_message(format!("Fetched {} rows", summary.rows_written));

    if !quiet {
        display::print_summary(&summary, &output);
    }

    Ok(())
}
