// till-render/tests/render_parity.rs
// Cross-renderer parity: the same record must show the same data, with
// byte-identical monetary formatting, through the command stream and
// every markup template.

use rust_decimal::Decimal;
use shared::{LineItem, LogoImage, ReceiptRecord};
use till_render::{
    CommandOptions, Directive, RenderError, Template, render_command_stream,
    render_markup_document,
};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn acme() -> ReceiptRecord {
    ReceiptRecord::builder("0001", "Acme Cafe")
        .transaction_id("tx-91f2")
        .date("2025-03-14")
        .time("10:42")
        .store_address("12 Harbor St")
        .store_phone("555-0100")
        .cashier_name("Dana")
        .item(LineItem::priced("i1", "Coffee", 2, dec("4.99")))
        .item(LineItem::priced("i2", "Blueberry Muffin", 1, dec("3.25")))
        .subtotal(dec("13.23"))
        .discount(dec("1.00"))
        .tax(dec("0.98"))
        .total(dec("13.21"))
        .payment_method("Cash")
        .payment_amount(dec("15.00"))
        .change_amount(dec("1.79"))
        .footer("Thank you for visiting!")
        .qrcode("https://example.test/r/0001")
        .build()
        .unwrap()
}

fn all_markup(record: &ReceiptRecord) -> Vec<(Template, String)> {
    Template::ALL
        .iter()
        .map(|t| (*t, t.render(record).unwrap()))
        .collect()
}

#[test]
fn every_renderer_shows_every_item() {
    let record = acme();
    let stream = render_command_stream(&record, &CommandOptions::default()).unwrap();
    let stream_text = stream.visible_text().join("\n");

    for item in &record.items {
        assert!(
            stream_text.contains(&item.name),
            "command stream lost item {}",
            item.name
        );
    }
    // Exactly one block per item, never invented or duplicated.
    assert_eq!(stream_text.matches("Coffee").count(), 1);
    assert_eq!(stream_text.matches("Blueberry Muffin").count(), 1);

    for (template, html) in all_markup(&record) {
        for item in &record.items {
            assert!(
                html.contains(&item.name),
                "template {template} lost item {}",
                item.name
            );
        }
        assert_eq!(html.matches("2 x $4.99").count(), 1, "template {template}");
    }
}

#[test]
fn discount_parity_across_renderers() {
    let with = acme();
    let mut without = acme();
    without.discount = None;
    without.total = dec("14.21");
    without.validate().unwrap();

    let stream = render_command_stream(&with, &CommandOptions::default()).unwrap();
    assert!(stream.visible_text().contains(&"-$1.00".to_string()));

    let stream = render_command_stream(&without, &CommandOptions::default()).unwrap();
    assert!(!stream.visible_text().iter().any(|t| t.contains("Discount")));

    for (template, html) in all_markup(&with) {
        assert!(html.contains("-$1.00"), "template {template}");
    }
    for (template, html) in all_markup(&without) {
        assert!(!html.contains("Discount"), "template {template}");
    }
}

#[test]
fn currency_formatting_is_identical_everywhere() {
    let record = acme();
    // The grand total string as the command stream renders it.
    let stream = render_command_stream(&record, &CommandOptions::default()).unwrap();
    let total = "$13.21";
    assert!(stream.visible_text().contains(&total.to_string()));

    for (template, html) in all_markup(&record) {
        assert!(html.contains(total), "template {template}");
        assert!(html.contains("$0.98"), "template {template}");
        assert!(html.contains("$1.79"), "template {template}");
    }
}

#[test]
fn templates_differ_only_in_presentation() {
    let record = acme();
    let docs = all_markup(&record);
    assert_eq!(docs.len(), 3);
    // Same conditional-section decisions: identical data markers in all.
    for (template, html) in &docs {
        assert!(html.contains("Receipt #"), "template {template}");
        assert!(html.contains("tx-91f2"), "template {template}");
        assert!(html.contains("Dana"), "template {template}");
        assert!(html.contains("Thank you for visiting!"), "template {template}");
        assert!(html.contains("<svg"), "template {template}");
        // No customer was set, so no template may show one.
        assert!(!html.contains("Customer"), "template {template}");
    }
    // But the documents themselves are distinct.
    assert_ne!(docs[0].1, docs[1].1);
    assert_ne!(docs[1].1, docs[2].1);
}

#[test]
fn unencodable_qr_is_omitted_by_every_renderer() {
    let mut record = acme();
    record.qrcode = Some("x".repeat(8000));

    let stream = render_command_stream(&record, &CommandOptions::default()).unwrap();
    assert!(!stream.iter().any(|d| matches!(d, Directive::Qr { .. })));

    for (template, html) in all_markup(&record) {
        assert!(!html.contains("<svg"), "template {template}");
    }
}

#[test]
fn unknown_template_names_the_valid_set() {
    let err = render_markup_document(&acme(), "neon").unwrap_err();
    match err {
        RenderError::UnknownTemplate { requested, valid } => {
            assert_eq!(requested, "neon");
            assert_eq!(valid, vec!["classic", "sans", "modern"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn logo_replaces_large_text_name() {
    let mut record = acme();

    // Without a logo the name is rendered as a heading / large text.
    let html = render_markup_document(&record, "classic").unwrap();
    assert!(html.contains("<h1 class=\"store-name\">Acme Cafe</h1>"));

    // A 1x1 black PNG.
    let mut bytes = Vec::new();
    let img = image::RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 255]));
    img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )
    .unwrap();
    record.store_logo = Some(LogoImage {
        bytes,
        mime: "image/png".to_string(),
    });

    let html = render_markup_document(&record, "classic").unwrap();
    assert!(html.contains("data:image/png;base64,"));
    assert!(!html.contains("<h1"));

    let stream = render_command_stream(&record, &CommandOptions::default()).unwrap();
    assert!(
        stream
            .iter()
            .any(|d| matches!(d, Directive::Image { width: 1, height: 1, .. }))
    );
}

#[test]
fn markup_escapes_user_text() {
    let record = ReceiptRecord::builder("0002", "Joe's <Grill> & Bar")
        .item(LineItem::priced("i1", "1/2 \"Special\"", 1, dec("5.00")))
        .subtotal(dec("5.00"))
        .total(dec("5.00"))
        .payment_method("Card")
        .build()
        .unwrap();

    let html = render_markup_document(&record, "sans").unwrap();
    assert!(html.contains("Joe&#39;s &lt;Grill&gt; &amp; Bar"));
    assert!(!html.contains("<Grill>"));
}
