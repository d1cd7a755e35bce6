use anyhow::{bail, Context, Result};

use crate::models::style::LayoutArchetype;

/// Service configuration loaded from environment variables.
/// Every variable is optional; malformed values fail at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Largest `objects` array a request may carry.
    pub max_elements: usize,
    pub default_layout: LayoutArchetype,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let max_elements = std::env::var("MAX_ELEMENTS")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<usize>()
            .context("MAX_ELEMENTS must be a positive integer")?;
        if max_elements == 0 {
            bail!("MAX_ELEMENTS must be a positive integer");
        }

        let layout = std::env::var("DEFAULT_LAYOUT").unwrap_or_else(|_| "single-column".to_string());
        let default_layout = LayoutArchetype::parse(&layout)
            .with_context(|| format!("DEFAULT_LAYOUT '{layout}' is not a known layout"))?;

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_elements,
            default_layout,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            max_elements: 5000,
            default_layout: LayoutArchetype::SingleColumn,
        }
    }
}
