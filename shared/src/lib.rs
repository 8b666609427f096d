//! Shared types for the receipt output pipeline
//!
//! Common types used by both the rendering engine and the device control
//! client: the canonical receipt record, money formatting, merchant
//! settings, and the wire message types for the device-control channel.

pub mod message;
pub mod money;
pub mod receipt;
pub mod settings;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use message::{Device, DeviceStatus, Envelope, MessageKind, Operation};
pub use money::{format_currency, format_quantity_line};
pub use receipt::{LineItem, LogoImage, ReceiptRecord, ReceiptRecordBuilder, ValidationError};
pub use settings::{MemorySettingsResolver, Settings, SettingsError, SettingsResolver};
