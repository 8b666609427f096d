//! Per-merchant receipt settings
//!
//! The rendering engine and the device client only ever read these values;
//! writing them stays with the settings resolver. Resolution is a single
//! idempotent `get_or_create`: when no settings exist for a merchant yet,
//! the resolver persists the documented defaults and returns them, so
//! callers never see a "not found" case.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Settings resolution failure (storage-level only; "not found" does not
/// exist by contract).
#[derive(Debug, Clone, Error)]
pub enum SettingsError {
    #[error("settings storage error: {0}")]
    Storage(String),
}

/// Receipt output settings for one merchant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Paper width in millimeters (58 or 80 for common thermal printers).
    pub paper_width_mm: u32,
    /// Printable characters per line at normal text size.
    pub chars_per_line: usize,
    /// Character encoding label, resolved via `encoding_rs`.
    pub encoding: String,
    /// Blank lines fed before the cut.
    pub feed_lines: u8,
    pub cut_enabled: bool,
    /// Markup template id ("classic", "sans", "modern").
    pub template_id: String,
    pub footer_text: Option<String>,
    pub qr_payload: Option<String>,
    /// Next receipt number to assign.
    pub next_receipt_number: u64,
}

impl Default for Settings {
    /// The documented default set created on first use:
    /// 80mm paper, 48 characters, UTF-8, 4 feed lines, cut enabled,
    /// classic template, numbering from 1.
    fn default() -> Self {
        Self {
            paper_width_mm: 80,
            chars_per_line: 48,
            encoding: "utf-8".to_string(),
            feed_lines: 4,
            cut_enabled: true,
            template_id: "classic".to_string(),
            footer_text: None,
            qr_payload: None,
            next_receipt_number: 1,
        }
    }
}

impl Settings {
    /// Resolve the configured encoding label.
    ///
    /// Returns `None` for labels `encoding_rs` does not know; callers fall
    /// back to UTF-8.
    pub fn encoding(&self) -> Option<&'static encoding_rs::Encoding> {
        encoding_rs::Encoding::for_label(self.encoding.as_bytes())
    }

    /// Take the next receipt number, advancing the counter.
    pub fn take_receipt_number(&mut self) -> u64 {
        let n = self.next_receipt_number;
        self.next_receipt_number += 1;
        n
    }
}

/// Settings resolver interface.
///
/// One operation by design: read and lazy-create are the same idempotent
/// call, so there is no status-code inspection and no lookup/create race.
#[async_trait]
pub trait SettingsResolver: Send + Sync {
    async fn get_or_create(&self, merchant_id: &str) -> Result<Settings, SettingsError>;
}

/// In-process settings resolver backed by a concurrent map.
#[derive(Debug, Default)]
pub struct MemorySettingsResolver {
    store: DashMap<String, Settings>,
}

impl MemorySettingsResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed settings for a merchant (test and demo setup).
    pub fn insert(&self, merchant_id: impl Into<String>, settings: Settings) {
        self.store.insert(merchant_id.into(), settings);
    }
}

#[async_trait]
impl SettingsResolver for MemorySettingsResolver {
    async fn get_or_create(&self, merchant_id: &str) -> Result<Settings, SettingsError> {
        let entry = self
            .store
            .entry(merchant_id.to_string())
            .or_insert_with(|| {
                debug!(merchant_id, "creating default settings");
                Settings::default()
            });
        Ok(entry.clone())
    }
}
