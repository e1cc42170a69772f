//! Catalog and cart session settings

use std::{path::PathBuf, str::FromStr};

use clap::Args;
use thiserror::Error;

use crate::products::ProductId;

/// Errors parsing a `--add` value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartEntryError {
    /// Nothing before the colon.
    #[error("missing product id in {0:?}")]
    MissingId(String),

    /// Quantity is not a positive whole number.
    #[error("invalid quantity in {0:?}")]
    InvalidQuantity(String),
}

/// A product and quantity to put in the cart, written `<id>` or `<id>:<qty>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEntry {
    /// Product to add
    pub id: ProductId,

    /// Units to add
    pub quantity: u32,
}

impl FromStr for CartEntry {
    type Err = CartEntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, quantity) = match s.split_once(':') {
            Some((id, quantity)) => {
                let quantity = quantity
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|quantity| *quantity > 0)
                    .ok_or_else(|| CartEntryError::InvalidQuantity(s.to_string()))?;

                (id, quantity)
            }
            None => (s, 1),
        };

        let id = id.trim();

        if id.is_empty() {
            return Err(CartEntryError::MissingId(s.to_string()));
        }

        Ok(CartEntry {
            id: ProductId::from(id),
            quantity,
        })
    }
}

/// Catalog and cart settings.
#[derive(Debug, Args)]
pub struct SessionConfig {
    /// Catalog YAML file; the bundled catalog is used when omitted
    #[arg(long, env = "SHOPFRONT_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Put a product in the cart, as `<id>` or `<id>:<qty>` (repeatable)
    #[arg(long = "add", value_name = "ID[:QTY]")]
    pub add: Vec<CartEntry>,

    /// Apply a coupon code to the cart
    #[arg(long)]
    pub coupon: Option<String>,

    /// Only list products whose name or description contains this term
    #[arg(long, default_value = "")]
    pub search: String,

    /// Place the order and print the receipt
    #[arg(long)]
    pub complete: bool,
}
