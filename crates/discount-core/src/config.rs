//! # Discount Configuration
//!
//! Loads discount definitions at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. `DISCOUNT_RULES` - inline JSON array of definitions
//! 2. `DISCOUNT_RULES_PATH` - path to a JSON file with the same array
//! 3. Defaults (no rules)
//!
//! `DISCOUNT_ROUNDING_DP` optionally sets the decimal places used by
//! [`DiscountConfig::round`].
//!
//! ## Definition Format
//! ```json
//! [
//!   { "type": "fixed_cart", "amount": 20, "name": "Welcome",
//!     "options": { "minimum_amount": 100 } },
//!   { "type": "percent", "amount": "12.5", "name": "Members", "priority": 1,
//!     "options": { "exclude_product_ids": [7] } }
//! ]
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after loading, so no mutex needed.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::error::DiscountError;
use crate::money::Money;
use crate::rule::{DiscountDefinition, DiscountRule};

/// Env var holding inline JSON definitions.
pub const ENV_RULES: &str = "DISCOUNT_RULES";
/// Env var holding a path to a JSON definitions file.
pub const ENV_RULES_PATH: &str = "DISCOUNT_RULES_PATH";
/// Env var holding the rounding precision.
pub const ENV_ROUNDING_DP: &str = "DISCOUNT_ROUNDING_DP";

/// Highest precision `rust_decimal` can represent.
const MAX_ROUNDING_DP: u32 = 28;

/// Discount configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscountConfig {
    /// Rule definitions, in the order they were configured.
    #[serde(default)]
    pub rules: Vec<DiscountDefinition>,

    /// Decimal places for presenting computed amounts.
    /// `None` keeps amounts exact.
    #[serde(default)]
    pub rounding_dp: Option<u32>,
}

impl DiscountConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = DiscountConfig::default();

        if let Ok(inline) = env::var(ENV_RULES) {
            config.rules = parse_definitions(&inline)?;
        } else if let Ok(path) = env::var(ENV_RULES_PATH) {
            config.rules = read_definitions(Path::new(&path))?;
        }

        if let Ok(dp) = env::var(ENV_ROUNDING_DP) {
            config.rounding_dp = Some(parse_rounding_dp(&dp)?);
        }

        info!(
            rules = config.rules.len(),
            rounding_dp = ?config.rounding_dp,
            "discount configuration loaded"
        );

        Ok(config)
    }

    /// Parses a full configuration document:
    /// `{ "rules": [...], "rounding_dp": 2 }`.
    ///
    /// ## Example
    /// ```rust
    /// use discount_core::DiscountConfig;
    ///
    /// let config = DiscountConfig::from_json_str(
    ///     r#"{ "rules": [{ "type": "fixed_cart", "amount": 20, "name": "Welcome" }] }"#,
    /// ).unwrap();
    /// assert_eq!(config.build_rules().unwrap().len(), 1);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: DiscountConfig = serde_json::from_str(json)?;
        if let Some(dp) = config.rounding_dp {
            check_rounding_dp("rounding_dp", dp)?;
        }
        Ok(config)
    }

    /// Builds every configured rule.
    ///
    /// Fails on the first definition with an unknown kind or malformed
    /// options; a half-loaded rule set is never returned.
    pub fn build_rules(&self) -> Result<Vec<DiscountRule>, ConfigError> {
        self.rules
            .iter()
            .map(|definition| {
                debug!(rule = %definition.name, kind = %definition.kind, "building discount rule");
                DiscountRule::from_definition(definition).map_err(ConfigError::from)
            })
            .collect()
    }

    /// Applies the configured presentation rounding to `amount`.
    pub fn round(&self, amount: Money) -> Money {
        match self.rounding_dp {
            Some(dp) => amount.round_dp(dp),
            None => amount,
        }
    }
}

fn parse_definitions(json: &str) -> Result<Vec<DiscountDefinition>, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

fn read_definitions(path: &Path) -> Result<Vec<DiscountDefinition>, ConfigError> {
    let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_definitions(&json)
}

fn parse_rounding_dp(value: &str) -> Result<u32, ConfigError> {
    let dp = value
        .trim()
        .parse::<u32>()
        .map_err(|_| ConfigError::InvalidValue(ENV_ROUNDING_DP.to_string()))?;
    check_rounding_dp(ENV_ROUNDING_DP, dp)?;
    Ok(dp)
}

fn check_rounding_dp(name: &str, dp: u32) -> Result<(), ConfigError> {
    if dp > MAX_ROUNDING_DP {
        return Err(ConfigError::InvalidValue(name.to_string()));
    }
    Ok(())
}

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid discount definitions: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Discount(#[from] DiscountError),
}
