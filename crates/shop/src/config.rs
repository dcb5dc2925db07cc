//! Shop configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MINIMART_PRODUCTS_URL` - HTTP endpoint returning the products JSON
//!   array (must be set together with `MINIMART_CATEGORIES_URL`)
//! - `MINIMART_CATEGORIES_URL` - HTTP endpoint returning the categories
//!   JSON array
//! - `MINIMART_DATA_DIR` - Directory holding `products.json` and
//!   `categories.json` when no endpoints are configured (default: `data`)
//! - `MINIMART_CART_PATH` - Path of the persisted cart slot
//!   (default: `cart.json`)
//! - `MINIMART_ORDER_WEBHOOK` - Host endpoint receiving the order payload;
//!   when absent, orders surface through a user-visible notification
//! - `MINIMART_PAGE_SIZE` - Products per page (default: 20)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default number of products revealed per pagination step.
const DEFAULT_PAGE_SIZE: usize = 20;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Shop application configuration.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Products endpoint; `None` selects file-based loading
    pub products_url: Option<Url>,
    /// Categories endpoint; `None` selects file-based loading
    pub categories_url: Option<Url>,
    /// Directory for `products.json` / `categories.json` in file mode
    pub data_dir: PathBuf,
    /// Path of the persisted cart slot
    pub cart_path: PathBuf,
    /// Host endpoint for order delivery; `None` selects the notification
    /// fallback
    pub order_webhook: Option<Url>,
    /// Products revealed per pagination step
    pub page_size: usize,
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid, or if
    /// only one of the two catalog endpoints is configured.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let products_url = get_optional_url("MINIMART_PRODUCTS_URL")?;
        let categories_url = get_optional_url("MINIMART_CATEGORIES_URL")?;
        match (&products_url, &categories_url) {
            (Some(_), None) => {
                return Err(ConfigError::MissingEnvVar(
                    "MINIMART_CATEGORIES_URL".to_string(),
                ));
            }
            (None, Some(_)) => {
                return Err(ConfigError::MissingEnvVar(
                    "MINIMART_PRODUCTS_URL".to_string(),
                ));
            }
            _ => {}
        }

        let data_dir = PathBuf::from(get_env_or_default("MINIMART_DATA_DIR", "data"));
        let cart_path = PathBuf::from(get_env_or_default("MINIMART_CART_PATH", "cart.json"));
        let order_webhook = get_optional_url("MINIMART_ORDER_WEBHOOK")?;
        let page_size = match get_optional_env("MINIMART_PAGE_SIZE") {
            Some(value) => parse_page_size(&value)?,
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            products_url,
            categories_url,
            data_dir,
            cart_path,
            order_webhook,
            page_size,
        })
    }

    /// Whether the catalog is loaded over HTTP rather than from files.
    #[must_use]
    pub const fn uses_http_source(&self) -> bool {
        self.products_url.is_some()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an optional environment variable parsed as a URL.
fn get_optional_url(key: &str) -> Result<Option<Url>, ConfigError> {
    get_optional_env(key)
        .map(|value| {
            Url::parse(&value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
        .transpose()
}

/// Parse a page-size value; must be a positive integer.
fn parse_page_size(value: &str) -> Result<usize, ConfigError> {
    let parsed = value.parse::<usize>().map_err(|e| {
        ConfigError::InvalidEnvVar("MINIMART_PAGE_SIZE".to_string(), e.to_string())
    })?;
    if parsed == 0 {
        return Err(ConfigError::InvalidEnvVar(
            "MINIMART_PAGE_SIZE".to_string(),
            "must be at least 1".to_string(),
        ));
    }
    Ok(parsed)
}
