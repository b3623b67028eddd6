//! Configuration for the refuel ledger

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Refuel ledger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Service version
    pub service_version: String,

    /// Currency display configuration
    pub currency: CurrencyConfig,

    /// Ticket rule configuration
    pub tickets: TicketConfig,

    /// Table view configuration
    pub view: ViewConfig,

    /// Actor configuration
    pub actor: ActorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "refuel-ledger".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            currency: CurrencyConfig::default(),
            tickets: TicketConfig::default(),
            view: ViewConfig::default(),
            actor: ActorConfig::default(),
        }
    }
}

/// Currency display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    /// Currency symbol placed before the amount
    pub symbol: String,

    /// Separator between integer and fractional digits
    pub decimal_separator: char,

    /// Separator between groups of three integer digits
    pub grouping_separator: char,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        // Brazilian real, e.g. "R$ 1.234,56"
        Self {
            symbol: "R$".to_string(),
            decimal_separator: ',',
            grouping_separator: '.',
        }
    }
}

/// Ticket rule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketConfig {
    /// Currency units needed for one ticket
    #[serde(with = "rust_decimal::serde::str")]
    pub amount_per_ticket: Decimal,
}

impl Default for TicketConfig {
    fn default() -> Self {
        Self {
            amount_per_ticket: Decimal::from(50),
        }
    }
}

/// Table view configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Records per page
    pub page_size: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self { page_size: 5 }
    }
}

/// Actor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorConfig {
    /// Bounded mailbox capacity
    pub mailbox_capacity: usize,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: 100,
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(size) = std::env::var("REFUEL_PAGE_SIZE") {
            config.view.page_size = size
                .parse()
                .map_err(|_| crate::Error::Config(format!("Invalid REFUEL_PAGE_SIZE: {}", size)))?;
        }

        if let Ok(unit) = std::env::var("REFUEL_AMOUNT_PER_TICKET") {
            config.tickets.amount_per_ticket = unit.parse().map_err(|_| {
                crate::Error::Config(format!("Invalid REFUEL_AMOUNT_PER_TICKET: {}", unit))
            })?;
        }

        if let Ok(symbol) = std::env::var("REFUEL_CURRENCY_SYMBOL") {
            config.currency.symbol = symbol;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check values that would break pagination, ticket math or parsing
    pub fn validate(&self) -> crate::Result<()> {
        if self.view.page_size == 0 {
            return Err(crate::Error::Config("page_size must be at least 1".to_string()));
        }
        if self.tickets.amount_per_ticket <= Decimal::ZERO {
            return Err(crate::Error::Config(
                "amount_per_ticket must be positive".to_string(),
            ));
        }
        if self.currency.symbol.trim().is_empty() {
            return Err(crate::Error::Config("currency symbol must not be empty".to_string()));
        }
        if self.currency.decimal_separator == self.currency.grouping_separator {
            return Err(crate::Error::Config(
                "decimal and grouping separators must differ".to_string(),
            ));
        }
        if self.actor.mailbox_capacity == 0 {
            return Err(crate::Error::Config(
                "mailbox_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service_name, "refuel-ledger");
        assert_eq!(config.currency.symbol, "R$");
        assert_eq!(config.tickets.amount_per_ticket, Decimal::from(50));
        assert_eq!(config.view.page_size, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[view]\npage_size = 10\n\n[tickets]\namount_per_ticket = \"25\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.view.page_size, 10);
        assert_eq!(config.tickets.amount_per_ticket, Decimal::from(25));
        assert_eq!(config.currency.decimal_separator, ',');
    }

    #[test]
    fn test_invalid_file_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[view]\npage_size = 0").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("page_size"));
    }

    #[test]
    fn test_same_separators_rejected() {
        let mut config = Config::default();
        config.currency.grouping_separator = ',';
        assert!(config.validate().is_err());
    }
}
