//! Sans template: light sans-serif layout for on-screen preview.

use crate::view::ReceiptView;

const CSS: &str = "\
body { margin: 0; padding: 16px; background: #fafafa; }
.receipt.sans {
  width: 340px; margin: 0 auto; padding: 20px 16px;
  background: #fff; color: #222;
  border: 1px solid #e3e3e3; border-radius: 6px;
  font-family: 'Helvetica Neue', Helvetica, Arial, sans-serif;
  font-size: 13px; line-height: 1.5;
}
.sans header.store { text-align: center; margin-bottom: 4px; }
.sans .logo { max-width: 220px; }
.sans .store-name { font-size: 20px; margin: 0 0 4px; font-weight: 500; }
.sans .store-line { margin: 0; color: #666; }
.sans hr { border: 0; border-top: 1px solid #eee; margin: 10px 0; }
.sans table { width: 100%; border-collapse: collapse; }
.sans td { padding: 2px 0; vertical-align: top; }
.sans .meta .label, .sans .payment .label { color: #888; }
.sans .meta .value, .sans .payment .value { text-align: right; }
.sans .item-name td { padding-top: 5px; font-weight: 500; }
.sans .item-detail .qty { padding-left: 10px; color: #888; }
.sans .item-detail .amount { text-align: right; }
.sans .totals .label { color: #888; }
.sans .totals .amount { text-align: right; }
.sans .totals .grand td {
  font-size: 17px; font-weight: 600; color: #000; padding-top: 6px;
}
.sans .footer { text-align: center; margin: 12px 0 0; color: #666; }
.sans .notes { margin: 10px 0 0; color: #666; white-space: pre-wrap; }
.sans .qr { text-align: center; margin-top: 12px; }
.sans .qr svg { width: 128px; height: 128px; }";

pub(crate) fn render(view: &ReceiptView) -> String {
    super::render_document(view, "sans", CSS)
}
