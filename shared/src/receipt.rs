//! Canonical receipt record
//!
//! The single normalized in-memory representation of a receipt, independent
//! of output format. Built once per print/preview/download action and never
//! mutated afterwards. Validation happens at construction; renderers only
//! re-check and propagate.

use crate::money::round_money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Receipt record validation failure, naming the violated invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("store_name must not be empty")]
    EmptyStoreName,

    #[error("receipt must contain at least one line item")]
    EmptyItems,

    /// `total` disagrees with `subtotal - discount + tax` by more than one
    /// cent.
    #[error("total {total} does not match subtotal - discount + tax = {expected}")]
    TotalMismatch { expected: Decimal, total: Decimal },
}

/// A single line item.
///
/// The record does not recompute `total`; callers must supply
/// `round(price * quantity, 2)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
    pub total: Decimal,
}

impl LineItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: u32,
        price: Decimal,
        total: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
            price,
            total,
        }
    }

    /// Convenience constructor that derives `total` from price and quantity.
    pub fn priced(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: u32,
        price: Decimal,
    ) -> Self {
        let total = round_money(price * Decimal::from(quantity));
        Self::new(id, name, quantity, price, total)
    }
}

/// An already-loaded logo image.
///
/// The bytes are decoded/rasterized by the renderers; keeping the load on
/// the caller side keeps rendering free of I/O.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoImage {
    pub bytes: Vec<u8>,
    /// MIME type, e.g. `image/png`. Used when inlining into markup.
    pub mime: String,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

/// Canonical receipt record.
///
/// `date` and `time` arrive pre-formatted; formatting them is the caller's
/// responsibility, not the renderer's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    // Identity
    pub receipt_number: String,
    pub transaction_id: Option<String>,

    // Context
    pub date: String,
    pub time: String,
    pub store_name: String,
    pub store_address: Option<String>,
    pub store_phone: Option<String>,
    pub store_logo: Option<LogoImage>,
    pub cashier_name: Option<String>,
    pub customer_name: Option<String>,

    // Line items
    pub items: Vec<LineItem>,

    // Monetary summary
    pub subtotal: Decimal,
    pub discount: Option<Decimal>,
    pub tax: Option<Decimal>,
    pub total: Decimal,

    // Payment
    pub payment_method: String,
    pub payment_amount: Option<Decimal>,
    pub change_amount: Option<Decimal>,

    // Presentation extras
    pub footer: Option<String>,
    pub notes: Option<String>,
    pub qrcode: Option<String>,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl ReceiptRecord {
    /// Start building a record. Required identity/context fields up front,
    /// everything else through the builder setters.
    pub fn builder(
        receipt_number: impl Into<String>,
        store_name: impl Into<String>,
    ) -> ReceiptRecordBuilder {
        ReceiptRecordBuilder::new(receipt_number, store_name)
    }

    /// Re-check the construction invariants.
    ///
    /// Records normally come out of [`ReceiptRecordBuilder::build`] already
    /// validated; renderers call this to reject hand-assembled records
    /// before producing any artifact.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.store_name.trim().is_empty() {
            return Err(ValidationError::EmptyStoreName);
        }
        if self.items.is_empty() {
            return Err(ValidationError::EmptyItems);
        }

        let expected = round_money(
            self.subtotal - self.discount.unwrap_or(Decimal::ZERO)
                + self.tax.unwrap_or(Decimal::ZERO),
        );
        // One-cent rounding tolerance
        let tolerance = Decimal::new(1, 2);
        if (round_money(self.total) - expected).abs() > tolerance {
            return Err(ValidationError::TotalMismatch {
                expected,
                total: self.total,
            });
        }

        Ok(())
    }
}

/// Builder for [`ReceiptRecord`]. `build` runs validation, so a successfully
/// built record always satisfies the invariants.
#[derive(Debug, Clone, Default)]
pub struct ReceiptRecordBuilder {
    receipt_number: String,
    transaction_id: Option<String>,
    date: String,
    time: String,
    store_name: String,
    store_address: Option<String>,
    store_phone: Option<String>,
    store_logo: Option<LogoImage>,
    cashier_name: Option<String>,
    customer_name: Option<String>,
    items: Vec<LineItem>,
    subtotal: Decimal,
    discount: Option<Decimal>,
    tax: Option<Decimal>,
    total: Decimal,
    payment_method: String,
    payment_amount: Option<Decimal>,
    change_amount: Option<Decimal>,
    footer: Option<String>,
    notes: Option<String>,
    qrcode: Option<String>,
    currency_symbol: Option<String>,
}

impl ReceiptRecordBuilder {
    pub fn new(receipt_number: impl Into<String>, store_name: impl Into<String>) -> Self {
        Self {
            receipt_number: receipt_number.into(),
            store_name: store_name.into(),
            ..Default::default()
        }
    }

    pub fn transaction_id(mut self, id: impl Into<String>) -> Self {
        self.transaction_id = Some(id.into());
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }

    pub fn store_address(mut self, address: impl Into<String>) -> Self {
        self.store_address = Some(address.into());
        self
    }

    pub fn store_phone(mut self, phone: impl Into<String>) -> Self {
        self.store_phone = Some(phone.into());
        self
    }

    pub fn store_logo(mut self, logo: LogoImage) -> Self {
        self.store_logo = Some(logo);
        self
    }

    pub fn cashier_name(mut self, name: impl Into<String>) -> Self {
        self.cashier_name = Some(name.into());
        self
    }

    pub fn customer_name(mut self, name: impl Into<String>) -> Self {
        self.customer_name = Some(name.into());
        self
    }

    pub fn item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn items(mut self, items: Vec<LineItem>) -> Self {
        self.items = items;
        self
    }

    pub fn subtotal(mut self, subtotal: Decimal) -> Self {
        self.subtotal = subtotal;
        self
    }

    pub fn discount(mut self, discount: Decimal) -> Self {
        self.discount = Some(discount);
        self
    }

    pub fn tax(mut self, tax: Decimal) -> Self {
        self.tax = Some(tax);
        self
    }

    pub fn total(mut self, total: Decimal) -> Self {
        self.total = total;
        self
    }

    pub fn payment_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = method.into();
        self
    }

    pub fn payment_amount(mut self, amount: Decimal) -> Self {
        self.payment_amount = Some(amount);
        self
    }

    pub fn change_amount(mut self, amount: Decimal) -> Self {
        self.change_amount = Some(amount);
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn qrcode(mut self, payload: impl Into<String>) -> Self {
        self.qrcode = Some(payload.into());
        self
    }

    pub fn currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = Some(symbol.into());
        self
    }

    /// Validate and build the record.
    pub fn build(self) -> Result<ReceiptRecord, ValidationError> {
        let record = ReceiptRecord {
            receipt_number: self.receipt_number,
            transaction_id: self.transaction_id,
            date: self.date,
            time: self.time,
            store_name: self.store_name,
            store_address: self.store_address,
            store_phone: self.store_phone,
            store_logo: self.store_logo,
            cashier_name: self.cashier_name,
            customer_name: self.customer_name,
            items: self.items,
            subtotal: self.subtotal,
            discount: self.discount,
            tax: self.tax,
            total: self.total,
            payment_method: self.payment_method,
            payment_amount: self.payment_amount,
            change_amount: self.change_amount,
            footer: self.footer,
            notes: self.notes,
            qrcode: self.qrcode,
            currency_symbol: self.currency_symbol.unwrap_or_else(default_currency_symbol),
        };
        record.validate()?;
        Ok(record)
    }
}
