//! Shopfront command line
//!
//! Loads a catalog, fills the cart from `--add` entries, applies a coupon and prints the product
//! listing followed by the cart receipt. `--complete` places the order.

use std::{
    io::{self, Write},
    process::ExitCode,
};

use tabled::{builder::Builder, settings::Style};
use thiserror::Error;
use tracing::{error, info};

use shopfront::{
    cart_page::CartPage,
    config::{ShopConfig, session::SessionConfig},
    coupons::CouponCode,
    fixtures::{Catalog, FixtureError},
    observability::{ObservabilityError, init_subscriber},
    operations::CartOperations,
    receipt::{Receipt, ReceiptError},
    store::{ShopStore, StoreError},
};

/// Errors that end the command.
#[derive(Debug, Error)]
enum CliError {
    /// Logging could not be set up.
    #[error(transparent)]
    Observability(#[from] ObservabilityError),

    /// Catalog could not be loaded.
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// A store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Receipt could not be built or printed.
    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    /// Writing to stdout failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    let config = match ShopConfig::load() {
        Ok(config) => config,
        Err(err) => {
            _ = err.print();

            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(err) = init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("Logging error: {err}");
        }

        return ExitCode::FAILURE;
    }

    match run(&config.session) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "shopfront failed");
            ExitCode::FAILURE
        }
    }
}

fn run(session: &SessionConfig) -> Result<(), CliError> {
    let catalog = match &session.catalog {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::bundled()?,
    };

    info!(
        products = catalog.products.len(),
        coupons = catalog.coupons.len(),
        "catalog loaded"
    );

    let mut store = ShopStore::from_catalog(catalog);

    for entry in &session.add {
        let target = i64::from(store.cart().quantity_of(&entry.id)) + i64::from(entry.quantity);

        if store.cart().get(&entry.id).is_none() && !store.add_to_cart(&entry.id)? {
            continue;
        }

        if target > 1 {
            store.update_quantity(&entry.id, target)?;
        }
    }

    if let Some(code) = &session.coupon {
        store.apply_coupon(&CouponCode::new(code))?;
    }

    let mut out = io::stdout().lock();

    write_listing(&mut out, &CartPage::build(&store, &session.search)?)?;

    if store.cart().is_empty() {
        writeln!(out, "장바구니가 비어있습니다")?;
        return Ok(());
    }

    let receipt = Receipt::from_cart(store.cart().items(), store.selected_coupon())?;

    let receipt = if session.complete {
        receipt.with_order_number(store.complete_order()?)
    } else {
        receipt
    };

    receipt.write_to(&mut out)?;

    Ok(())
}

fn write_listing(out: &mut impl Write, page: &CartPage) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["ID", "상품", "가격", "재고", "할인"]);

    for row in &page.products {
        builder.push_record([
            row.id.to_string(),
            row.name.clone(),
            row.price_label.clone(),
            row.stock_label.clone(),
            row.discount_label.clone().unwrap_or_default(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());

    writeln!(out, "{table}")
}
