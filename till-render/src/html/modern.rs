//! Modern template: bold headers, solid rules, heavy grand total.

use crate::view::ReceiptView;

const CSS: &str = "\
body { margin: 0; padding: 16px; background: #ececec; }
.receipt.modern {
  width: 340px; margin: 0 auto; padding: 0 0 18px;
  background: #fff; color: #1a1a1a; overflow: hidden;
  border-radius: 8px; box-shadow: 0 1px 4px rgba(0,0,0,.15);
  font-family: 'Segoe UI', Roboto, Arial, sans-serif;
  font-size: 13px; line-height: 1.5;
}
.modern header.store {
  text-align: center; background: #1a1a1a; color: #fff;
  padding: 18px 16px 14px;
}
.modern .logo { max-width: 220px; }
.modern .store-name {
  font-size: 22px; margin: 0 0 4px; font-weight: 800;
  text-transform: uppercase; letter-spacing: 1px;
}
.modern .store-line { margin: 0; color: #ccc; }
.modern hr { border: 0; border-top: 2px solid #1a1a1a; margin: 10px 16px; }
.modern table { width: calc(100% - 32px); margin: 0 16px; border-collapse: collapse; }
.modern td { padding: 2px 0; vertical-align: top; }
.modern .meta .label, .modern .payment .label { font-weight: 600; }
.modern .meta .value, .modern .payment .value { text-align: right; }
.modern .item-name td { padding-top: 5px; font-weight: 700; }
.modern .item-detail .qty { padding-left: 10px; }
.modern .item-detail .amount { text-align: right; font-weight: 600; }
.modern .totals .amount { text-align: right; }
.modern .totals .grand td {
  font-size: 19px; font-weight: 800; padding-top: 8px;
  border-top: 2px solid #1a1a1a;
}
.modern .footer { text-align: center; margin: 12px 16px 0; font-weight: 600; }
.modern .notes { margin: 10px 16px 0; white-space: pre-wrap; }
.modern .qr { text-align: center; margin-top: 12px; }
.modern .qr svg { width: 128px; height: 128px; }";

pub(crate) fn render(view: &ReceiptView) -> String {
    super::render_document(view, "modern", CSS)
}
