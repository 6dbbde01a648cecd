use anyhow::{Context, Result};
use catalog::DisplayCurrency;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Snapshot directory written by `catalog-builder build`. Bundled data when `None`.
    pub catalog_dir: Option<PathBuf>,
    pub currency: DisplayCurrency,
    pub site_url: String,
    pub brand: String,
    /// Simulated delivery time for contact-form submissions.
    pub contact_delay: Duration,
    /// Comma-separated allowed origins; any origin when unset.
    pub cors_allow_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            catalog_dir: None,
            currency: DisplayCurrency::Usd,
            site_url: "https://yourdomain.com".into(),
            brand: "Your Travel Brand".into(),
            contact_delay: Duration::from_millis(600),
            cors_allow_origin: None,
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by DISPLAY_CURRENCY, SITE_URL, BRAND_NAME,
    /// CONTACT_DELAY_MS and CORS_ALLOW_ORIGIN.
    pub fn from_env() -> Result<Self> {
        let mut config = ServerConfig::default();
        if let Ok(val) = std::env::var("DISPLAY_CURRENCY") {
            config.currency = val.parse().map_err(anyhow::Error::msg)?;
        }
        if let Ok(val) = std::env::var("SITE_URL") {
            config.site_url = val;
        }
        if let Ok(val) = std::env::var("BRAND_NAME") {
            config.brand = val;
        }
        if let Ok(val) = std::env::var("CONTACT_DELAY_MS") {
            let ms: u64 = val.trim().parse().with_context(|| format!("CONTACT_DELAY_MS: {val}"))?;
            config.contact_delay = Duration::from_millis(ms);
        }
        config.cors_allow_origin = std::env::var("CORS_ALLOW_ORIGIN").ok();
        Ok(config)
    }
}
