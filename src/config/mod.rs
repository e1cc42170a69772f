//! Command line configuration

use clap::Parser;

use crate::config::{observability::LoggingConfig, session::SessionConfig};

pub mod observability;
pub mod session;

pub use observability::LogFormat;
pub use session::{CartEntry, CartEntryError};

/// Shopfront configuration
#[derive(Debug, Parser)]
#[command(name = "shopfront", about = "Shopfront cart and checkout", long_about = None)]
pub struct ShopConfig {
    /// Catalog and cart settings.
    #[command(flatten)]
    pub session: SessionConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl ShopConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}
