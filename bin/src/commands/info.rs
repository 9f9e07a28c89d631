//! Info command implementation.
//!
//! This module displays detailed information about a contract,
//! including fetch estimates for common look-back periods.

use anyhow::{Context, Result};

use chicama_estimate::{format_bytes, format_duration};
use chicama_lib::prelude::*;

/// Show detailed information about a contract, including fetch estimates.
pub(crate) fn show_info(symbol: &str) -> Result<()> {
    let registry = ContractRegistry::global();
    let contract = registry
        .get(symbol)
        .with_context(|| format!("Unknown symbol: {symbol}"))?;

    // Basic info
    println!("Contract:   {}", contract.name());
    println!("Symbol:     {}", contract.symbol());
    println!("Type:       {}", contract.security_type());
    println!("Currency:   {}", contract.currency());
    println!("Exchange:   {}", contract.exchange());
    println!("Session:    {}", contract.session().as_str());

    // Fetch estimates for common look-back periods
    let today = chrono::Utc::now().date_naive();

    println!("\nFetch Estimates (1 min bars):");
    println!(
        "{:<20} {:>10} {:>14} {:>10}",
        "PERIOD", "REQUESTS", "OUTPUT (CSV)", "EST. TIME"
    );
    println!("{}", "-".repeat(58));

    let periods = [
        ("Last 1 week", 7),
        ("Last 1 month", 30),
        ("Last 1 year", 365),
        ("Last 5 years", 5 * 365),
    ];
    for (label, days) in periods {
        if let Ok(window) = FetchWindow::new(today - chrono::Duration::days(days), today) {
            let plan = chicama_estimate::plan(window, BarSize::Min1, today);
            println!(
                "{:<20} {:>10} {:>14} {:>10}",
                label,
                plan.requests.len(),
                format_bytes(plan.estimated_csv_bytes),
                format_duration(plan.estimated_duration),
            );
        }
    }

    println!("\nNote: Estimates assume full regular sessions and may vary.");
    Ok(())
}
