//! Contract definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Security type of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityType {
    /// Common stock or exchange-traded fund.
    Stock,
    /// Cash index.
    Index,
}

impl SecurityType {
    /// Returns the provider's security type code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Stock => "STK",
            Self::Index => "IND",
        }
    }

    /// Returns all security types.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Stock, Self::Index]
    }
}

impl fmt::Display for SecurityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for SecurityType {
    type Err = SecurityTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stock" | "stk" | "etf" => Ok(Self::Stock),
            "index" | "ind" => Ok(Self::Index),
            _ => Err(SecurityTypeParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid security type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityTypeParseError(String);

impl fmt::Display for SecurityTypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid security type: '{}'. Valid types: stock, index",
            self.0
        )
    }
}

impl std::error::Error for SecurityTypeParseError {}

/// Trading-session ruleset applied during timestamp normalization.
///
/// The profile selects the opening-hour anchor table used to derive each
/// day's clock correction, and decides whether the regular-session window
/// filter and gap-filling apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SessionProfile {
    /// US equity session: 09:30 open, corrections keyed off 06/07/08
    /// opening hours, no filtering or filling.
    #[default]
    UsEquity,
    /// CBOE volatility index session: overnight open, bars outside the
    /// regular window are dropped and missing minutes are filled.
    CboeVix,
}

impl SessionProfile {
    /// Returns the profile identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UsEquity => "us-equity",
            Self::CboeVix => "cboe-vix",
        }
    }

    /// Returns true if bars outside the regular window are dropped and
    /// missing session minutes are synthesized.
    #[must_use]
    pub const fn fills_gaps(&self) -> bool {
        matches!(self, Self::CboeVix)
    }
}

impl fmt::Display for SessionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tradable contract with the identity fields a historical-data
/// request needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    symbol: String,
    name: String,
    security_type: SecurityType,
    currency: String,
    exchange: String,
    session: SessionProfile,
}

impl Contract {
    /// Creates a new contract.
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        security_type: SecurityType,
        currency: impl Into<String>,
        exchange: impl Into<String>,
        session: SessionProfile,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            security_type,
            currency: currency.into(),
            exchange: exchange.into(),
            session,
        }
    }

    /// Creates a USD stock contract with the symbol as its name.
    #[must_use]
    pub fn stock(symbol: impl Into<String>, exchange: impl Into<String>) -> Self {
        let symbol = symbol.into();
        Self {
            name: symbol.clone(),
            symbol,
            security_type: SecurityType::Stock,
            currency: "USD".to_string(),
            exchange: exchange.into(),
            session: SessionProfile::UsEquity,
        }
    }

    /// Returns the ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the security type.
    #[must_use]
    pub const fn security_type(&self) -> SecurityType {
        self.security_type
    }

    /// Returns the quote currency.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Returns the exchange the contract is routed to.
    #[must_use]
    pub fn exchange(&self) -> &str {
        &self.exchange
    }

    /// Returns the session profile used during normalization.
    #[must_use]
    pub const fn session(&self) -> SessionProfile {
        self.session
    }

    /// Returns true if this is a stock contract.
    #[must_use]
    pub const fn is_stock(&self) -> bool {
        matches!(self.security_type, SecurityType::Stock)
    }

    /// Returns true if this is an index contract.
    #[must_use]
    pub const fn is_index(&self) -> bool {
        matches!(self.security_type, SecurityType::Index)
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.symbol, self.exchange)
    }
}
