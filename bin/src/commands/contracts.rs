//! Contracts command implementation.
//!
//! This module lists the known contracts with optional filtering.

use anyhow::Result;

use chicama_lib::prelude::*;

/// List known contracts with optional type filter or search pattern.
pub(crate) fn list_contracts(security_type: Option<&str>, search: Option<&str>) -> Result<()> {
    let registry = ContractRegistry::global();

    let mut contracts: Vec<&Contract> = match (security_type, search) {
        (Some(t), _) => {
            let security_type = t
                .parse::<SecurityType>()
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            registry.by_security_type(security_type)
        }
        (_, Some(pattern)) => registry.search(pattern),
        (None, None) => registry.all().collect(),
    };
    contracts.sort_by(|a, b| a.symbol().cmp(b.symbol()));

    if contracts.is_empty() {
        println!("No contracts found.");
        return Ok(());
    }

    println!(
        "{:<8} {:<28} {:<8} {:<10} {:<10}",
        "SYMBOL", "NAME", "TYPE", "EXCHANGE", "SESSION"
    );
    println!("{}", "-".repeat(66));

    for contract in &contracts {
        println!(
            "{:<8} {:<28} {:<8} {:<10} {:<10}",
            contract.symbol(),
            contract.name(),
            contract.security_type(),
            contract.exchange(),
            contract.session().as_str()
        );
    }

    println!("\nTotal: {} contracts", contracts.len());
    Ok(())
}
