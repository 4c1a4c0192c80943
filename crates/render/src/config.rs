//! Render configuration.
//!
//! Defaults describe the RevLine shop. A JSON file named by
//! `REVLINE_RENDER_CONFIG` may replace any field, and individual environment
//! variables override the file.

use std::path::PathBuf;

use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "REVLINE_RENDER_CONFIG";
pub const LOGO_ENV: &str = "REVLINE_LOGO";
pub const WATERMARK_ENV: &str = "REVLINE_WATERMARK";
pub const CURRENCY_ENV: &str = "REVLINE_CURRENCY";
pub const UTC_OFFSET_ENV: &str = "REVLINE_UTC_OFFSET_HOURS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for {var}: {value:?}")]
    InvalidOverride { var: &'static str, value: String },
}

/// Which column sits between the item name and its price on invoices.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceVariant {
    #[default]
    Quantity,
    Details,
}

/// How a line item without a recorded quantity prints.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroQuantityDisplay {
    #[default]
    Dash,
    Zero,
}

impl ZeroQuantityDisplay {
    pub fn placeholder(self) -> &'static str {
        match self {
            ZeroQuantityDisplay::Dash => "-",
            ZeroQuantityDisplay::Zero => "0",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    pub company_name: String,
    /// Printed right-aligned under the logo, one entry per line.
    pub address_lines: Vec<String>,
    pub currency_symbol: String,
    pub invoice_variant: InvoiceVariant,
    pub zero_quantity: ZeroQuantityDisplay,
    /// Offset applied to order timestamps before printing.
    pub utc_offset_hours: i32,
    pub logo_path: Option<PathBuf>,
    pub watermark_path: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            company_name: "RevLine Motor Works".to_string(),
            address_lines: vec![
                "E-G-12, Pangsapuri Putra Raya".to_string(),
                "Jalan PP 32, Seksyen 2".to_string(),
                "Taman Pinggiran Putra".to_string(),
                "43300 Seri Kembangan, Selangor".to_string(),
                "Business Reg. No: 202503190421 (003752485-M)".to_string(),
            ],
            currency_symbol: "RM".to_string(),
            invoice_variant: InvoiceVariant::default(),
            zero_quantity: ZeroQuantityDisplay::default(),
            utc_offset_hours: 8,
            logo_path: None,
            watermark_path: None,
        }
    }
}

impl RenderConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: RenderConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the optional config file, then apply environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                tracing::debug!(path = %path.display(), "loaded render config file");
                Self::from_json_str(&raw)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Apply per-field overrides from `lookup` (the process environment in production).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(path) = lookup(LOGO_ENV).filter(|v| !v.is_empty()) {
            self.logo_path = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup(WATERMARK_ENV).filter(|v| !v.is_empty()) {
            self.watermark_path = Some(PathBuf::from(path));
        }
        if let Some(symbol) = lookup(CURRENCY_ENV) {
            self.currency_symbol = symbol;
        }
        if let Some(raw) = lookup(UTC_OFFSET_ENV) {
            self.utc_offset_hours = raw.trim().parse().map_err(|_| ConfigError::InvalidOverride {
                var: UTC_OFFSET_ENV,
                value: raw.clone(),
            })?;
        }
        self.validate()
    }

    /// Offset for printed timestamps; out-of-range hours fall back to UTC.
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_hours * 3600).unwrap_or_else(|| Utc.fix())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(-23..=23).contains(&self.utc_offset_hours) {
            return Err(ConfigError::InvalidOverride {
                var: UTC_OFFSET_ENV,
                value: self.utc_offset_hours.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_describe_the_shop() {
        let config = RenderConfig::default();
        assert_eq!(config.currency_symbol, "RM");
        assert_eq!(config.address_lines.len(), 5);
        assert_eq!(config.zero_quantity, ZeroQuantityDisplay::Dash);
        assert_eq!(config.utc_offset().local_minus_utc(), 8 * 3600);
    }

    #[test]
    fn json_overrides_only_named_fields() {
        let config = RenderConfig::from_json_str(
            r#"{"addressLines": [], "zeroQuantity": "zero", "invoiceVariant": "details"}"#,
        )
        .unwrap();
        assert!(config.address_lines.is_empty());
        assert_eq!(config.zero_quantity, ZeroQuantityDisplay::Zero);
        assert_eq!(config.invoice_variant, InvoiceVariant::Details);
        assert_eq!(config.currency_symbol, "RM");
    }

    #[test]
    fn env_overrides_win_over_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            (LOGO_ENV, "/srv/revline/logo.png"),
            (CURRENCY_ENV, "MYR "),
            (UTC_OFFSET_ENV, "0"),
        ]);
        let mut config = RenderConfig::default();
        config
            .apply_overrides(|var| env.get(var).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.logo_path, Some(PathBuf::from("/srv/revline/logo.png")));
        assert_eq!(config.currency_symbol, "MYR ");
        assert_eq!(config.utc_offset_hours, 0);
    }

    #[test]
    fn bad_offset_is_rejected() {
        let mut config = RenderConfig::default();
        let err = config
            .apply_overrides(|var| (var == UTC_OFFSET_ENV).then(|| "eight".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOverride { var: UTC_OFFSET_ENV, .. }));

        assert!(RenderConfig::from_json_str(r#"{"utcOffsetHours": 30}"#).is_err());
    }
}
