//! Contract registry for the chicama historical bar downloader.
//!
//! Provides the embedded catalog of contracts chicama can fetch,
//! looked up by symbol:
//!
//! ```
//! use chicama_contracts::ContractRegistry;
//!
//! let registry = ContractRegistry::global();
//! if let Some(contract) = registry.get("spy") {
//!     println!("{}: {}", contract.symbol(), contract.name());
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/chicama/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::sync::OnceLock;

use chicama_types::{Contract, SecurityType};

const CONTRACTS_JSON: &str = include_str!("../data/contracts.json");

static REGISTRY: OnceLock<ContractRegistry> = OnceLock::new();

/// Registry of all known contracts.
#[derive(Debug, Clone)]
pub struct ContractRegistry {
    contracts: HashMap<String, Contract>,
}

impl ContractRegistry {
    /// Returns the global contract registry.
    pub fn global() -> &'static Self {
        REGISTRY.get_or_init(Self::load)
    }

    fn load() -> Self {
        let contracts: HashMap<String, Contract> =
            serde_json::from_str(CONTRACTS_JSON).expect("Invalid contracts.json");
        Self { contracts }
    }

    /// Gets a contract by its symbol (case-insensitive).
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&Contract> {
        self.contracts.get(&symbol.to_lowercase())
    }

    /// Returns all contracts.
    pub fn all(&self) -> impl Iterator<Item = &Contract> {
        self.contracts.values()
    }

    /// Returns the number of contracts in the registry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Returns true if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Returns all contracts of the given security type.
    #[must_use]
    pub fn by_security_type(&self, security_type: SecurityType) -> Vec<&Contract> {
        let mut matches: Vec<&Contract> = self
            .contracts
            .values()
            .filter(|c| c.security_type() == security_type)
            .collect();
        matches.sort_by_key(|c| c.symbol());
        matches
    }

    /// Searches contracts whose symbol or name contains the pattern
    /// (case-insensitive).
    #[must_use]
    pub fn search(&self, pattern: &str) -> Vec<&Contract> {
        let pattern = pattern.to_lowercase();
        let mut matches: Vec<&Contract> = self
            .contracts
            .values()
            .filter(|c| {
                c.symbol().to_lowercase().contains(&pattern)
                    || c.name().to_lowercase().contains(&pattern)
            })
            .collect();
        matches.sort_by_key(|c| c.symbol());
        matches
    }

    /// Returns all symbols, sorted.
    #[must_use]
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.contracts.values().map(Contract::symbol).collect();
        symbols.sort_unstable();
        symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chicama_types::SessionProfile;

    #[test]
    fn test_registry_loads() {
        let registry = ContractRegistry::global();
        assert!(!registry.is_empty());
        assert!(registry.len() >= 10);
    }

    #[test]
    fn test_get_contract() {
        let registry = ContractRegistry::global();
        let spy = registry.get("spy").unwrap();
        assert_eq!(spy.symbol(), "SPY");
        assert_eq!(spy.currency(), "USD");
        assert_eq!(spy.exchange(), "ARCA");
        assert!(spy.is_stock());
    }

    #[test]
    fn test_get_case_insensitive() {
        let registry = ContractRegistry::global();
        assert!(registry.get("SPY").is_some());
        assert!(registry.get("Spy").is_some());
    }

    #[test]
    fn test_get_unknown_symbol() {
        let registry = ContractRegistry::global();
        assert!(registry.get("XXXX").is_none());
    }

    #[test]
    fn test_vix_session_profile() {
        let registry = ContractRegistry::global();
        let vix = registry.get("vix").unwrap();
        assert!(vix.is_index());
        assert_eq!(vix.session(), SessionProfile::CboeVix);
        assert_eq!(vix.exchange(), "CBOE");
    }

    #[test]
    fn test_equity_contracts_use_equity_profile() {
        let registry = ContractRegistry::global();
        for contract in registry.by_security_type(SecurityType::Stock) {
            assert_eq!(contract.session(), SessionProfile::UsEquity);
        }
    }

    #[test]
    fn test_search() {
        let registry = ContractRegistry::global();
        let results = registry.search("russell");
        assert!(results.iter().any(|c| c.symbol() == "IWM"));
        assert!(results.iter().any(|c| c.symbol() == "RUT"));
    }

    #[test]
    fn test_symbols_sorted() {
        let registry = ContractRegistry::global();
        let symbols = registry.symbols();
        let mut sorted = symbols.clone();
        sorted.sort_unstable();
        assert_eq!(symbols, sorted);
    }
}
