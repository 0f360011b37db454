use crate::catalog::DEFAULT_STOCK_CONDITIONS;

/// Engine configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | LOG_LEVEL | info | Log level (overridden by RUST_LOG) |
/// | LOG_JSON | false | Emit JSON log lines |
/// | LOG_DIR | (unset) | Directory for daily rolling log files |
/// | DEFAULT_STOCK_CONDITIONS | Brand New,Used,Refurbished | Condition buckets created for a product without stock |
/// | AUTO_INIT_STOCK | true | Create the default buckets on first stock read |
///
/// # Example
///
/// ```ignore
/// DEFAULT_STOCK_CONDITIONS="New,Open Box" LOG_LEVEL=debug cargo test
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// Condition names materialized for a product with no stock types
    pub default_stock_conditions: Vec<String>,
    /// Whether stock reads lazily materialize the default conditions
    pub auto_init_stock: bool,
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            default_stock_conditions: std::env::var("DEFAULT_STOCK_CONDITIONS")
                .ok()
                .map(|v| parse_conditions(&v))
                .filter(|c| !c.is_empty())
                .unwrap_or_else(default_conditions),
            auto_init_stock: std::env::var("AUTO_INIT_STOCK")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }

    /// Replace the default stock conditions
    ///
    /// Mostly used by tests.
    pub fn with_conditions<I, S>(mut self, conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_stock_conditions = conditions.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn default_conditions() -> Vec<String> {
    DEFAULT_STOCK_CONDITIONS.iter().map(|c| c.to_string()).collect()
}

/// Split a comma separated list, trimming blanks
fn parse_conditions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}
