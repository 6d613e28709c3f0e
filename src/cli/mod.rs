//! Command handlers

use std::io::{self, Write};

use clap::Subcommand;
use thiserror::Error;

use comptoir::{
    cart::CartError,
    catalog::{Catalog, CatalogError},
    receipt::ReceiptError,
    storage::{AgeGate, FileStore, StorageError},
};

use crate::config::AppConfig;

mod age;
mod cart;
mod catalog;
mod quote;

/// Errors reported to the user by the CLI.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Catalog could not be loaded
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Data directory could not be read or written
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Cart rejected the change
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Receipt could not be written
    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    /// Output could not be written
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),

    /// No product has this id
    #[error("unknown product: {0}")]
    UnknownProduct(String),

    /// No accessory has this id
    #[error("unknown accessory: {0}")]
    UnknownAccessory(String),

    /// The id is not in the cart
    #[error("{0} is not in the cart")]
    NotInCart(String),

    /// The session has not confirmed the visitor's age
    #[error("this shop is reserved for adults; run `comptoir age verify` to confirm you are 18 or over")]
    AgeNotVerified,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Confirm or check the visitor's age for this session
    Age(age::AgeCommand),

    #[command(flatten)]
    Shop(ShopCommand),
}

/// Commands that require a verified session.
#[derive(Debug, Subcommand)]
pub(crate) enum ShopCommand {
    /// Browse the catalog
    Catalog(catalog::CatalogCommand),

    /// Price a weight of product or a quantity of accessories
    Quote(quote::QuoteCommand),

    /// View and change the cart
    Cart(cart::CartCommand),
}

pub(crate) fn run(config: AppConfig) -> Result<(), CliError> {
    let gate = AgeGate::new(FileStore::new(config.storage.session_dir()));
    let mut out = io::stdout().lock();

    let command = match config.command {
        Command::Age(command) => return age::run(command, &gate, &mut out),
        Command::Shop(command) => command,
    };

    if !gate.is_verified()? {
        return Err(CliError::AgeNotVerified);
    }

    let catalog = match &config.storage.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin()?,
    };

    match command {
        ShopCommand::Catalog(command) => catalog::run(command, &catalog, &mut out),
        ShopCommand::Quote(command) => quote::run(command, &catalog, &mut out),
        ShopCommand::Cart(command) => cart::run(
            command,
            &catalog,
            FileStore::new(config.storage.store_dir()),
            &mut out,
        ),
    }
}

/// Write a blank-line separated heading.
fn heading(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "\n \x1b[1m{title}\x1b[0m")
}
