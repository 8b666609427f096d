//! # till-render
//!
//! Rendering engine for the receipt pipeline - pure functions only.
//!
//! ## Scope
//!
//! This crate turns one canonical [`ReceiptRecord`](shared::ReceiptRecord)
//! into output artifacts:
//! - A printer command stream ([`render_command_stream`]): an ordered
//!   directive sequence, serialized into a printer's native command
//!   language by a downstream driver integration.
//! - A markup document ([`render_markup_document`]): self-contained HTML
//!   for on-screen preview, image rasterization, or PDF capture.
//!
//! Rendering performs no I/O and never touches the device layer. Delivery
//! to a physical printer goes through `till-client`.
//!
//! ## Example
//!
//! ```ignore
//! use shared::{LineItem, ReceiptRecord};
//! use till_render::{render_command_stream, render_markup_document, CommandOptions};
//!
//! let record = ReceiptRecord::builder("0001", "Acme Cafe")
//!     .item(LineItem::priced("i1", "Coffee", 2, "4.99".parse()?))
//!     .subtotal("9.98".parse()?)
//!     .tax("0.80".parse()?)
//!     .total("10.78".parse()?)
//!     .payment_method("Cash")
//!     .build()?;
//!
//! let stream = render_command_stream(&record, &CommandOptions::default())?;
//! let html = render_markup_document(&record, "classic")?;
//! ```

mod command;
mod directive;
mod error;
mod html;
mod template;
mod view;

#[cfg(feature = "image")]
mod logo;

// Re-exports
pub use command::{CommandOptions, render_command_stream};
pub use directive::{
    Align, ColumnAlign, CommandSequence, Directive, QrCorrection, QrOptions, TableColumn, TextSize,
};
pub use error::{RenderError, RenderResult};
pub use template::{Template, render_markup_document};
