//! Fixtures
//!
//! Catalog seeds (products and coupons) loaded from YAML.

use std::{collections::HashSet, fs, path::Path};

use thiserror::Error;

use crate::{coupons::Coupon, products::Product};

pub mod coupons;
pub mod products;

/// Catalog bundled with the crate.
const BUNDLED_CATALOG_YAML: &str = include_str!("../../fixtures/catalog/default.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid discount rate format
    #[error("Invalid discount rate: {0}")]
    InvalidRate(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Two products share an id
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// Two coupons share a code
    #[error("Duplicate coupon code: {0}")]
    DuplicateCoupon(String),
}

/// Catalog file layout
#[derive(Debug, serde::Deserialize)]
pub struct CatalogFixture {
    /// Products, in display order
    #[serde(default)]
    pub products: Vec<products::ProductFixture>,

    /// Coupons, in display order
    #[serde(default)]
    pub coupons: Vec<coupons::CouponFixture>,
}

/// Initial products and coupons for a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Products
    pub products: Vec<Product>,

    /// Coupons
    pub coupons: Vec<Coupon>,
}

impl Catalog {
    /// The catalog shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled YAML is invalid.
    pub fn bundled() -> Result<Self, FixtureError> {
        Self::from_yaml(BUNDLED_CATALOG_YAML)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not describe a valid catalog.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed YAML, invalid prices or rates, and duplicate product ids
    /// or coupon codes.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        Self::try_from(fixture)
    }
}

impl TryFrom<CatalogFixture> for Catalog {
    type Error = FixtureError;

    fn try_from(fixture: CatalogFixture) -> Result<Self, Self::Error> {
        let mut product_ids = HashSet::new();
        let mut products = Vec::with_capacity(fixture.products.len());

        for product_fixture in fixture.products {
            let product = Product::try_from(product_fixture)?;

            if !product_ids.insert(product.id.clone()) {
                return Err(FixtureError::DuplicateProduct(product.id.to_string()));
            }

            products.push(product);
        }

        let mut coupon_codes = HashSet::new();
        let mut coupons = Vec::with_capacity(fixture.coupons.len());

        for coupon_fixture in fixture.coupons {
            let coupon = Coupon::from(coupon_fixture);

            if !coupon_codes.insert(coupon.code.clone()) {
                return Err(FixtureError::DuplicateCoupon(coupon.code.to_string()));
            }

            coupons.push(coupon);
        }

        Ok(Catalog { products, coupons })
    }
}
