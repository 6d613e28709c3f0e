//! Receipt
//!
//! Tabular rendering of a cart: one row per line item, followed by the totals,
//! the gifts earned and the sample allowance.

use std::{fmt::Write, io};

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{Cart, CartObserver, CartSummary},
    storage::KeyValueStore,
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// One rendered line item.
#[derive(Debug, Clone)]
struct ReceiptRow<'a> {
    name: String,
    kind: &'static str,
    quantity: String,
    base_price: Option<Money<'a, Currency>>,
    final_price: Option<Money<'a, Currency>>,
    discount: Option<&'static str>,
}

/// Snapshot of a cart ready to print.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    rows: SmallVec<[ReceiptRow<'a>; 8]>,
    summary: CartSummary<'a>,
}

impl<'a> Receipt<'a> {
    /// Build a receipt from the current cart contents.
    pub fn from_cart<S: KeyValueStore, O: CartObserver>(cart: &Cart<'a, S, O>) -> Self {
        let mut rows = SmallVec::new();

        for line in cart.flower_quotes() {
            let discounted = line.quote.discount() > Decimal::ZERO;

            rows.push(ReceiptRow {
                name: line.product.name.clone(),
                kind: line.product.category.label(),
                quantity: line.weight.to_string(),
                base_price: Some(line.quote.raw_total()),
                final_price: discounted.then(|| line.quote.final_total()),
                discount: discounted.then(|| line.quote.discount_label()),
            });
        }

        for line in cart.accessory_quotes() {
            let discount = line.quote.discount_label();

            rows.push(ReceiptRow {
                name: line.accessory.name.clone(),
                kind: "Accessoire",
                quantity: format!("x{}", line.quantity),
                base_price: Some(line.quote.raw_total()),
                final_price: discount.map(|_| line.quote.final_total()),
                discount,
            });
        }

        let catalog = cart.catalog();

        for sample in cart.samples() {
            let Some(product) = catalog.product(sample.product) else {
                continue;
            };

            rows.push(ReceiptRow {
                name: product.name.clone(),
                kind: "Échantillon",
                quantity: sample.weight().to_string(),
                base_price: None,
                final_price: None,
                discount: None,
            });
        }

        Receipt {
            rows,
            summary: *cart.summary(),
        }
    }

    /// Totals printed under the table.
    pub fn summary(&self) -> &CartSummary<'a> {
        &self.summary
    }

    /// Number of line items on the receipt.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the receipt has no line items.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Writes the receipt to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        if self.is_empty() {
            return writeln!(out, "\n Your cart is empty.\n").map_err(|_err| ReceiptError::IO);
        }

        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Type", "Quantity", "Price", "Discount", "Total"]);

        for (idx, row) in self.rows.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                row.name.clone(),
                row.kind.to_string(),
                row.quantity.clone(),
                row.base_price.map_or_else(|| "Offert".to_string(), |p| p.to_string()),
                row.discount.unwrap_or_default().to_string(),
                row.final_price
                    .or(row.base_price)
                    .map_or_else(|| "Offert".to_string(), |p| p.to_string()),
            ]);
        }

        write_receipt_table(&mut out, builder, &self.rows)?;
        write_receipt_summary(&mut out, &self.summary)
    }
}

fn write_receipt_table(
    out: &mut impl io::Write,
    builder: Builder,
    rows: &[ReceiptRow<'_>],
) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..7), Alignment::right());
    table.modify(Columns::new(2..3), color_dark_grey());

    for (idx, row) in rows.iter().enumerate() {
        // header is row 0
        let table_row = idx + 1;

        if row.final_price.is_some() {
            table.modify((table_row, 4), color_dark_grey());
            table.modify((table_row, 6), Color::FG_GREEN);
        }
    }

    let table_str = colorize_borders(&table.to_string());

    writeln!(out, "\n{table_str}").map_err(|_err| ReceiptError::IO)
}

fn write_receipt_summary(
    out: &mut impl io::Write,
    summary: &CartSummary<'_>,
) -> Result<(), ReceiptError> {
    let savings_percent_points = savings_percent_points(summary);

    let subtotal_label = " Subtotal:";
    let total_label = " \x1b[1mTotal:\x1b[0m";
    let savings_label = " Savings:";

    let subtotal_val = format!("{}  ", summary.subtotal());
    let total_val = format!("{}  ", summary.total());
    let savings_val = format!("({savings_percent_points:.2}%) {}  ", summary.savings());

    let label_width = visible_width(subtotal_label)
        .max(visible_width(total_label))
        .max(visible_width(savings_label));

    let value_width = subtotal_val
        .len()
        .max(total_val.len())
        .max(savings_val.len());

    write_summary_line(out, subtotal_label, &subtotal_val, label_width, value_width)?;

    write_summary_line(
        out,
        total_label,
        &format!("\x1b[1m{total_val}\x1b[0m"),
        label_width,
        value_width,
    )?;

    write_summary_line(out, savings_label, &savings_val, label_width, value_width)?;

    writeln!(out).map_err(|_err| ReceiptError::IO)?;

    write_promotions(out, summary)
}

fn write_promotions(out: &mut impl io::Write, summary: &CartSummary<'_>) -> Result<(), ReceiptError> {
    writeln!(out, " Flower weight: {}", summary.flower_weight()).map_err(|_err| ReceiptError::IO)?;

    if let Some(gifts) = summary.gifts() {
        let contents = gifts
            .contents()
            .items()
            .iter()
            .map(|(item, quantity)| format!("{quantity}x {}", item.name()))
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(out, " Gifts: {gifts} ({contents})").map_err(|_err| ReceiptError::IO)?;
    }

    let samples = summary.samples();

    if samples.allowance() > 0 || samples.chosen() > 0 {
        writeln!(
            out,
            " Samples: {} of {} chosen",
            samples.chosen(),
            samples.allowance()
        )
        .map_err(|_err| ReceiptError::IO)?;
    }

    writeln!(out).map_err(|_err| ReceiptError::IO)
}

/// Savings relative to the pre-discount subtotal, in percent points.
fn savings_percent_points(summary: &CartSummary<'_>) -> Decimal {
    let subtotal = summary.subtotal().to_minor_units();

    if subtotal == 0 {
        return Decimal::ZERO;
    }

    (Decimal::from(summary.savings().to_minor_units()) * Decimal::ONE_HUNDRED
        / Decimal::from(subtotal))
    .round_dp(2)
}

/// Wraps runs of UTF-8 box-drawing characters in ANSI dark-grey escape codes.
///
/// Box-drawing characters occupy the Unicode range U+2500..U+257F.
fn colorize_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_run = false;

    for ch in table.chars() {
        let box_char = ('\u{2500}'..='\u{257F}').contains(&ch);

        if box_char && !in_run {
            _ = out.write_str("\x1b[90m");
            in_run = true;
        } else if !box_char && in_run {
            _ = out.write_str("\x1b[0m");
            in_run = false;
        }

        out.push(ch);
    }

    if in_run {
        _ = out.write_str("\x1b[0m");
    }

    out
}

/// Returns the visible (non-ANSI) width of a string.
fn visible_width(s: &str) -> usize {
    let mut width = 0usize;
    let mut in_escape = false;

    for ch in s.chars() {
        if in_escape {
            if ch.is_ascii_alphabetic() {
                in_escape = false;
            }
        } else if ch == '\x1b' {
            in_escape = true;
        } else {
            width += 1;
        }
    }

    width
}

/// Writes a summary line with a right-aligned label and a fixed-width value column.
fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
    label_col_width: usize,
    value_col_width: usize,
) -> Result<(), ReceiptError> {
    let label_pad = label_col_width.saturating_sub(visible_width(label));
    let value_pad = value_col_width.saturating_sub(visible_width(value));

    writeln!(
        out,
        "{:>label_pad$}{label}  {value_pad}{value}",
        "",
        value_pad = " ".repeat(value_pad)
    )
    .map_err(|_err| ReceiptError::IO)
}

/// ANSI dark grey foreground.
fn color_dark_grey() -> Color {
    Color::new("\x1b[90m", "\x1b[0m")
}
