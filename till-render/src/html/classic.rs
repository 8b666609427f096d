//! Classic template: monospaced, dashed separators, the look of the paper
//! tape itself.

use crate::view::ReceiptView;

const CSS: &str = "\
body { margin: 0; padding: 16px; background: #f4f4f4; }
.receipt.classic {
  width: 320px; margin: 0 auto; padding: 16px 12px;
  background: #fff; color: #111;
  font-family: 'Courier New', Courier, monospace;
  font-size: 12px; line-height: 1.45;
}
.classic header.store { text-align: center; }
.classic .logo { max-width: 200px; }
.classic .store-name { font-size: 18px; margin: 0 0 4px; font-weight: 700; }
.classic .store-line { margin: 0; }
.classic hr { border: 0; border-top: 1px dashed #111; margin: 8px 0; }
.classic table { width: 100%; border-collapse: collapse; }
.classic td { padding: 1px 0; vertical-align: top; }
.classic .meta .value, .classic .payment .value { text-align: right; }
.classic .item-name td { padding-top: 4px; }
.classic .item-detail .qty { padding-left: 8px; }
.classic .item-detail .amount { text-align: right; }
.classic .totals .amount { text-align: right; }
.classic .totals .grand td {
  font-size: 16px; font-weight: 700; padding-top: 4px;
}
.classic .footer { text-align: center; margin: 10px 0 0; }
.classic .notes { margin: 8px 0 0; white-space: pre-wrap; }
.classic .qr { text-align: center; margin-top: 10px; }
.classic .qr svg { width: 120px; height: 120px; }";

pub(crate) fn render(view: &ReceiptView) -> String {
    super::render_document(view, "classic", CSS)
}
