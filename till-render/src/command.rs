//! Printer command-stream renderer
//!
//! Maps one canonical record to the fixed directive sequence:
//! header → separator → metadata → separator → item blocks → separator →
//! totals → separator → payment → footer → notes → QR → feed → cut.
//! Absent optional data emits nothing - no empty lines, no placeholders.

use crate::directive::{
    Align, CommandSequence, Directive, QrOptions, TableColumn, TextSize,
};
use crate::error::RenderResult;
use crate::view::ReceiptContent;
use shared::{ReceiptRecord, Settings};

/// Layout options for the command stream.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOptions {
    /// Printable characters per line at normal size.
    pub chars_per_line: usize,
    /// Blank lines fed before the cut.
    pub feed_lines: u8,
    pub cut_enabled: bool,
    pub qr: QrOptions,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            chars_per_line: 48,
            feed_lines: 4,
            cut_enabled: true,
            qr: QrOptions::default(),
        }
    }
}

impl CommandOptions {
    /// Derive layout options from merchant settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            chars_per_line: settings.chars_per_line,
            feed_lines: settings.feed_lines,
            cut_enabled: settings.cut_enabled,
            qr: QrOptions::default(),
        }
    }
}

/// Left label / right value row. Fractions sum to 1.0.
fn two_col(left: impl Into<String>, right: impl Into<String>) -> Directive {
    Directive::Table {
        columns: vec![
            TableColumn::left(left, 0.6),
            TableColumn::right(right, 0.4),
        ],
    }
}

/// Render a record into a printer command stream.
///
/// Pure: no I/O, no device access. Fails with the record's
/// [`ValidationError`](shared::ValidationError) before emitting anything.
pub fn render_command_stream(
    record: &ReceiptRecord,
    options: &CommandOptions,
) -> RenderResult<CommandSequence> {
    let content = ReceiptContent::build(record)?;
    let mut d: Vec<Directive> = Vec::with_capacity(64);

    // ── Header: logo, or the store name in large text ──
    d.push(Directive::Align {
        align: Align::Center,
    });
    match logo_directive(record) {
        Some(image) => d.push(image),
        None => {
            d.push(Directive::TextSize {
                size: TextSize::Double,
            });
            d.push(Directive::Line {
                text: content.store_name.clone(),
            });
            d.push(Directive::TextSize {
                size: TextSize::Normal,
            });
        }
    }
    if let Some(address) = &content.store_address {
        d.push(Directive::Line {
            text: address.clone(),
        });
    }
    if let Some(phone) = &content.store_phone {
        d.push(Directive::Line {
            text: phone.clone(),
        });
    }
    d.push(Directive::Separator);

    // ── Metadata ──
    d.push(Directive::Align { align: Align::Left });
    for (label, value) in &content.meta {
        d.push(two_col(*label, value.clone()));
    }
    d.push(Directive::Separator);

    // ── Item blocks ──
    for item in &content.items {
        d.push(Directive::Line {
            text: item.name.clone(),
        });
        d.push(two_col(item.quantity_line.clone(), item.total.clone()));
    }
    d.push(Directive::Separator);

    // ── Totals ──
    for row in &content.totals {
        if row.emphasize {
            d.push(Directive::Bold { on: true });
            d.push(Directive::TextSize {
                size: TextSize::Double,
            });
            d.push(two_col(row.label, row.value.clone()));
            d.push(Directive::TextSize {
                size: TextSize::Normal,
            });
            d.push(Directive::Bold { on: false });
        } else {
            d.push(two_col(row.label, row.value.clone()));
        }
    }
    d.push(Directive::Separator);

    // ── Payment ──
    for (label, value) in &content.payment {
        d.push(two_col(*label, value.clone()));
    }

    // ── Optional trailer sections ──
    if let Some(footer) = &content.footer {
        d.push(Directive::Align {
            align: Align::Center,
        });
        d.push(Directive::Line {
            text: footer.clone(),
        });
    }
    if let Some(notes) = &content.notes {
        d.push(Directive::Align { align: Align::Left });
        d.push(Directive::Line {
            text: notes.clone(),
        });
    }
    if let Some(payload) = &content.qr_payload {
        d.push(Directive::Align {
            align: Align::Center,
        });
        d.push(Directive::Qr {
            payload: payload.clone(),
            options: options.qr,
        });
    }

    d.push(Directive::Feed {
        lines: options.feed_lines,
    });
    if options.cut_enabled {
        d.push(Directive::Cut);
    }

    Ok(CommandSequence {
        chars_per_line: options.chars_per_line,
        directives: d,
    })
}

#[cfg(feature = "image")]
fn logo_directive(record: &ReceiptRecord) -> Option<Directive> {
    let logo = record.store_logo.as_ref()?;
    let raster = crate::logo::rasterize_logo(logo)?;
    Some(Directive::Image {
        width: raster.width,
        height: raster.height,
        bitmap: raster.bitmap,
    })
}

#[cfg(not(feature = "image"))]
fn logo_directive(_record: &ReceiptRecord) -> Option<Directive> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::{LineItem, ReceiptRecord, ValidationError};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn acme() -> ReceiptRecord {
        ReceiptRecord::builder("0001", "Acme Cafe")
            .date("2025-03-14")
            .time("10:42")
            .item(LineItem::priced("i1", "Coffee", 2, dec("4.99")))
            .subtotal(dec("9.98"))
            .tax(dec("0.80"))
            .total(dec("10.78"))
            .payment_method("Cash")
            .payment_amount(dec("11.00"))
            .change_amount(dec("0.22"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_acme_scenario() {
        let stream = render_command_stream(&acme(), &CommandOptions::default()).unwrap();
        let text = stream.visible_text();

        // Exactly one item block
        assert_eq!(text.iter().filter(|t| *t == "Coffee").count(), 1);
        assert_eq!(text.iter().filter(|t| *t == "2 x $4.99").count(), 1);
        assert!(text.contains(&"$9.98".to_string()));

        // Totals block with bold double-size total
        assert!(text.contains(&"$0.80".to_string()));
        assert!(text.contains(&"$10.78".to_string()));
        let bold_on = stream
            .iter()
            .position(|d| *d == Directive::Bold { on: true })
            .unwrap();
        match &stream.directives[bold_on + 2] {
            Directive::Table { columns } => assert_eq!(columns[1].text, "$10.78"),
            other => panic!("expected total table, got {other:?}"),
        }

        // Payment block
        assert!(text.contains(&"$11.00".to_string()));
        assert!(text.contains(&"$0.22".to_string()));

        // No discount line
        assert!(!text.iter().any(|t| t == "Discount"));
    }

    #[test]
    fn test_absent_sections_emit_nothing() {
        let stream = render_command_stream(&acme(), &CommandOptions::default()).unwrap();
        assert!(
            !stream
                .iter()
                .any(|d| matches!(d, Directive::Qr { .. } | Directive::Image { .. }))
        );
        // No empty text lines as placeholders
        assert!(stream.visible_text().iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn test_no_logo_substitutes_large_name() {
        let stream = render_command_stream(&acme(), &CommandOptions::default()).unwrap();
        let d = &stream.directives;
        assert_eq!(
            d[0],
            Directive::Align {
                align: Align::Center
            }
        );
        assert_eq!(
            d[1],
            Directive::TextSize {
                size: TextSize::Double
            }
        );
        assert_eq!(
            d[2],
            Directive::Line {
                text: "Acme Cafe".to_string()
            }
        );
    }

    #[test]
    fn test_discount_present_emits_row() {
        let record = ReceiptRecord::builder("0002", "Acme Cafe")
            .item(LineItem::priced("i1", "Coffee", 1, dec("5.00")))
            .subtotal(dec("5.00"))
            .discount(dec("1.00"))
            .total(dec("4.00"))
            .payment_method("Card")
            .build()
            .unwrap();
        let stream = render_command_stream(&record, &CommandOptions::default()).unwrap();
        let text = stream.visible_text();
        let idx = text.iter().position(|t| t == "Discount").unwrap();
        assert_eq!(text[idx + 1], "-$1.00");
    }

    #[test]
    fn test_options_drive_feed_and_cut() {
        let options = CommandOptions {
            chars_per_line: 32,
            feed_lines: 2,
            cut_enabled: false,
            qr: QrOptions::default(),
        };
        let stream = render_command_stream(&acme(), &options).unwrap();
        assert_eq!(stream.chars_per_line, 32);
        assert_eq!(
            stream.directives.last(),
            Some(&Directive::Feed { lines: 2 })
        );
        assert!(!stream.iter().any(|d| *d == Directive::Cut));
    }

    #[test]
    fn test_invalid_record_rejected_before_rendering() {
        let mut record = acme();
        record.total = dec("99.99");
        let err = render_command_stream(&record, &CommandOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            crate::RenderError::Validation(ValidationError::TotalMismatch { .. })
        ));
    }

    #[test]
    fn test_qr_and_trailer_sections() {
        let mut record = acme();
        record.footer = Some("Thank you!".to_string());
        record.notes = Some("No refunds on sale items.".to_string());
        record.qrcode = Some("https://example.test/r/0001".to_string());

        let stream = render_command_stream(&record, &CommandOptions::default()).unwrap();
        let text = stream.visible_text();
        assert!(text.contains(&"Thank you!".to_string()));
        assert!(text.contains(&"No refunds on sale items.".to_string()));
        assert!(stream.iter().any(|d| matches!(
            d,
            Directive::Qr { payload, .. } if payload == "https://example.test/r/0001"
        )));
    }

    #[test]
    fn test_table_fractions_sum_to_one() {
        let stream = render_command_stream(&acme(), &CommandOptions::default()).unwrap();
        for d in stream.iter() {
            if let Directive::Table { columns } = d {
                let sum: f32 = columns.iter().map(|c| c.width).sum();
                assert!((sum - 1.0).abs() < 1e-6);
            }
        }
    }
}
