//! Pre-formatted receipt content shared by every renderer
//!
//! All renderers lay out the same [`ReceiptContent`]: the conditional
//! sections and every formatted value are decided here, once, so templates
//! can differ only in typography and layout, never in which data they
//! show. Markup templates additionally consume [`ReceiptView`], which adds
//! the inlined logo and QR artifacts.

use crate::error::RenderResult;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use shared::{ReceiptRecord, format_currency, format_quantity_line};
use tracing::warn;

/// One line item, formatted.
#[derive(Debug, Clone)]
pub(crate) struct ItemLines {
    pub name: String,
    /// `"2 x $4.99"`
    pub quantity_line: String,
    /// `"$9.98"`
    pub total: String,
}

/// One row of the totals block.
#[derive(Debug, Clone)]
pub(crate) struct TotalsRow {
    pub label: &'static str,
    pub value: String,
    /// Bold double-size rendering (the grand total).
    pub emphasize: bool,
}

/// Everything a renderer is allowed to show, already formatted. Optional
/// record fields that are absent simply do not appear here.
#[derive(Debug, Clone)]
pub(crate) struct ReceiptContent {
    pub store_name: String,
    pub store_address: Option<String>,
    pub store_phone: Option<String>,
    pub meta: Vec<(&'static str, String)>,
    pub items: Vec<ItemLines>,
    pub totals: Vec<TotalsRow>,
    pub payment: Vec<(&'static str, String)>,
    pub footer: Option<String>,
    pub notes: Option<String>,
    pub qr_payload: Option<String>,
}

impl ReceiptContent {
    pub fn build(record: &ReceiptRecord) -> RenderResult<Self> {
        record.validate()?;
        let symbol = record.currency_symbol.as_str();

        let mut meta: Vec<(&'static str, String)> = Vec::new();
        meta.push(("Receipt #", record.receipt_number.clone()));
        if let Some(tx) = &record.transaction_id {
            meta.push(("Transaction", tx.clone()));
        }
        if !record.date.is_empty() {
            meta.push(("Date", record.date.clone()));
        }
        if !record.time.is_empty() {
            meta.push(("Time", record.time.clone()));
        }
        if let Some(cashier) = &record.cashier_name {
            meta.push(("Cashier", cashier.clone()));
        }
        if let Some(customer) = &record.customer_name {
            meta.push(("Customer", customer.clone()));
        }

        let items = record
            .items
            .iter()
            .map(|item| ItemLines {
                name: item.name.clone(),
                quantity_line: format_quantity_line(item.quantity, item.price, symbol),
                total: format_currency(item.total, symbol),
            })
            .collect();

        let mut totals = vec![TotalsRow {
            label: "Subtotal",
            value: format_currency(record.subtotal, symbol),
            emphasize: false,
        }];
        if let Some(discount) = record.discount {
            totals.push(TotalsRow {
                label: "Discount",
                value: format!("-{}", format_currency(discount, symbol)),
                emphasize: false,
            });
        }
        if let Some(tax) = record.tax {
            totals.push(TotalsRow {
                label: "Tax",
                value: format_currency(tax, symbol),
                emphasize: false,
            });
        }
        totals.push(TotalsRow {
            label: "Total",
            value: format_currency(record.total, symbol),
            emphasize: true,
        });

        let mut payment = vec![("Payment", record.payment_method.clone())];
        if let Some(amount) = record.payment_amount {
            payment.push(("Tendered", format_currency(amount, symbol)));
        }
        if let Some(change) = record.change_amount {
            payment.push(("Change", format_currency(change, symbol)));
        }

        Ok(Self {
            store_name: record.store_name.clone(),
            store_address: record.store_address.clone(),
            store_phone: record.store_phone.clone(),
            meta,
            items,
            totals,
            payment,
            footer: record.footer.clone(),
            notes: record.notes.clone(),
            qr_payload: record.qrcode.clone().filter(|p| qr_encodable(p)),
        })
    }
}

/// [`ReceiptContent`] plus the self-contained markup artifacts.
#[derive(Debug, Clone)]
pub(crate) struct ReceiptView {
    pub content: ReceiptContent,
    /// Logo inlined as a base64 data URI.
    pub logo_data_uri: Option<String>,
    /// QR code inlined as an SVG fragment.
    pub qr_svg: Option<String>,
}

impl ReceiptView {
    pub fn build(record: &ReceiptRecord) -> RenderResult<Self> {
        let content = ReceiptContent::build(record)?;

        let logo_data_uri = record.store_logo.as_ref().map(|logo| {
            format!(
                "data:{};base64,{}",
                logo.mime,
                BASE64.encode(&logo.bytes)
            )
        });

        let qr_svg = content.qr_payload.as_deref().and_then(render_qr_svg);

        Ok(Self {
            content,
            logo_data_uri,
            qr_svg,
        })
    }
}

/// Check the payload fits a QR symbol. A rejected payload drops the QR
/// section from every output family, so the command stream and the markup
/// templates stay in agreement.
fn qr_encodable(payload: &str) -> bool {
    match qrcode::QrCode::new(payload.as_bytes()) {
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, "qr payload rejected, omitting qr section");
            false
        }
    }
}

/// Render a QR payload to an inline SVG fragment. Payloads were already
/// vetted by [`ReceiptContent::build`].
fn render_qr_svg(payload: &str) -> Option<String> {
    let code = qrcode::QrCode::new(payload.as_bytes()).ok()?;
    Some(
        code.render::<qrcode::render::svg::Color>()
            .min_dimensions(160, 160)
            .quiet_zone(true)
            .build(),
    )
}

/// Minimal HTML text escaping for user-supplied strings.
pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
