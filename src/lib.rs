//! Shopfront
//!
//! Shopfront is the state core of a small Korean storefront: a product catalog with quantity
//! discount tiers, a coupon book, a stock-aware cart with bulk-purchase pricing, and the admin
//! forms that edit them. Everything is plain synchronous state behind [`store::ShopStore`].

pub mod admin;
pub mod cart;
pub mod cart_page;
pub mod config;
pub mod coupons;
pub mod fixtures;
pub mod formatters;
pub mod notifications;
pub mod observability;
pub mod operations;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod store;
