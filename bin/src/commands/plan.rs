//! Plan command implementation.
//!
//! This module shows the bounded-request walk a fetch would perform,
//! without issuing any request.

use anyhow::{Context, Result};

use chicama_lib::prelude::*;

use crate::display;

/// Show the request plan for a contract and window.
pub(crate) fn show_plan(
    symbol: &str,
    from_str: &str,
    to_str: Option<&str>,
    bar_size_str: &str,
    as_of_str: Option<&str>,
) -> Result<()> {
    let registry = ContractRegistry::global();
    let contract = registry
        .get(symbol)
        .with_context(|| format!("Unknown symbol: {symbol}"))?;

    let from = display::parse_date(from_str, "from")?;
    let to = match to_str {
        Some(s) => display::parse_date(s, "to")?,
        None => chrono::Utc::now().date_naive(),
    };
    let window = FetchWindow::new(from, to)?;

    let bar_size = bar_size_str
        .parse::<BarSize>()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let as_of = match as_of_str {
        Some(s) => display::parse_date(s, "as-of")?,
        None => chrono::Utc::now().date_naive(),
    };

    let plan = chicama_estimate::plan(window, bar_size, as_of);

    println!(
        "Fetch plan for {} ({} bars), {}:",
        contract.symbol(),
        bar_size,
        window
    );
    println!();
    println!("{:<4} {:<12} {:>10}", "#", "ANCHOR", "SPAN");
    println!("{}", "-".repeat(28));
    for (i, request) in plan.requests.iter().enumerate() {
        println!("{:<4} {:<12} {:>10}", i + 1, request.anchor, request.span);
    }
    println!();
    println!("{}", plan.summary());

    Ok(())
}
