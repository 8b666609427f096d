//! Markup document assembly
//!
//! One shared body builder produces the document structure for every
//! template; templates contribute only their stylesheet. That keeps the
//! "templates never differ in which data they display" rule structural
//! instead of reviewed-by-hand.

pub(crate) mod classic;
pub(crate) mod modern;
pub(crate) mod sans;

use crate::view::{ReceiptView, escape_html};
use std::fmt::Write;

/// Assemble a self-contained HTML document around the shared view.
pub(crate) fn render_document(view: &ReceiptView, template_id: &str, css: &str) -> String {
    let c = &view.content;
    let mut out = String::with_capacity(4096);

    // Infallible: fmt::Write on String never errors.
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Receipt {}</title>\n<style>\n{}\n</style>\n</head>\n\
         <body>\n<div class=\"receipt {}\">\n",
        escape_html(&c.meta[0].1),
        css,
        template_id,
    );

    // ── Header ──
    out.push_str("<header class=\"store\">\n");
    match &view.logo_data_uri {
        Some(uri) => {
            let _ = write!(
                out,
                "<img class=\"logo\" src=\"{}\" alt=\"{}\">\n",
                uri,
                escape_html(&c.store_name)
            );
        }
        None => {
            let _ = write!(
                out,
                "<h1 class=\"store-name\">{}</h1>\n",
                escape_html(&c.store_name)
            );
        }
    }
    if let Some(address) = &c.store_address {
        let _ = write!(out, "<p class=\"store-line\">{}</p>\n", escape_html(address));
    }
    if let Some(phone) = &c.store_phone {
        let _ = write!(out, "<p class=\"store-line\">{}</p>\n", escape_html(phone));
    }
    out.push_str("</header>\n<hr>\n");

    // ── Metadata ──
    out.push_str("<table class=\"meta\">\n");
    for (label, value) in &c.meta {
        let _ = write!(
            out,
            "<tr><td class=\"label\">{}</td><td class=\"value\">{}</td></tr>\n",
            escape_html(label),
            escape_html(value)
        );
    }
    out.push_str("</table>\n<hr>\n");

    // ── Items ──
    out.push_str("<table class=\"items\">\n");
    for item in &c.items {
        let _ = write!(
            out,
            "<tr class=\"item-name\"><td colspan=\"2\">{}</td></tr>\n\
             <tr class=\"item-detail\"><td class=\"qty\">{}</td>\
             <td class=\"amount\">{}</td></tr>\n",
            escape_html(&item.name),
            escape_html(&item.quantity_line),
            escape_html(&item.total)
        );
    }
    out.push_str("</table>\n<hr>\n");

    // ── Totals ──
    out.push_str("<table class=\"totals\">\n");
    for row in &c.totals {
        let class = if row.emphasize { " class=\"grand\"" } else { "" };
        let _ = write!(
            out,
            "<tr{}><td class=\"label\">{}</td><td class=\"amount\">{}</td></tr>\n",
            class,
            escape_html(row.label),
            escape_html(&row.value)
        );
    }
    out.push_str("</table>\n<hr>\n");

    // ── Payment ──
    out.push_str("<table class=\"payment\">\n");
    for (label, value) in &c.payment {
        let _ = write!(
            out,
            "<tr><td class=\"label\">{}</td><td class=\"value\">{}</td></tr>\n",
            escape_html(label),
            escape_html(value)
        );
    }
    out.push_str("</table>\n");

    // ── Optional trailer sections ──
    if let Some(footer) = &c.footer {
        let _ = write!(out, "<p class=\"footer\">{}</p>\n", escape_html(footer));
    }
    if let Some(notes) = &c.notes {
        let _ = write!(out, "<p class=\"notes\">{}</p>\n", escape_html(notes));
    }
    if let Some(svg) = &view.qr_svg {
        let _ = write!(out, "<div class=\"qr\">{}</div>\n", svg);
    }

    out.push_str("</div>\n</body>\n</html>\n");
    out
}
