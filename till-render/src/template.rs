//! Markup template selection
//!
//! Templates form a closed enumeration: adding or removing one is a
//! compile-time-checked exhaustive match, and the string boundary lives in
//! a single place (`Template::from_id`).

use crate::error::{RenderError, RenderResult};
use crate::html;
use crate::view::ReceiptView;
use serde::{Deserialize, Serialize};
use shared::ReceiptRecord;
use std::fmt;

/// The available markup templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    /// Monospaced paper-tape look.
    Classic,
    /// Light sans-serif preview layout.
    Sans,
    /// Bold header-block layout.
    Modern,
}

impl Template {
    pub const ALL: [Template; 3] = [Template::Classic, Template::Sans, Template::Modern];

    pub fn id(self) -> &'static str {
        match self {
            Template::Classic => "classic",
            Template::Sans => "sans",
            Template::Modern => "modern",
        }
    }

    /// Resolve a template id, failing with the valid set on unknown ids.
    pub fn from_id(id: &str) -> RenderResult<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Template::Classic),
            "sans" => Ok(Template::Sans),
            "modern" => Ok(Template::Modern),
            _ => Err(RenderError::UnknownTemplate {
                requested: id.to_string(),
                valid: Self::ALL.iter().map(|t| t.id()).collect(),
            }),
        }
    }

    /// Render a record with this template.
    pub fn render(self, record: &ReceiptRecord) -> RenderResult<String> {
        let view = ReceiptView::build(record)?;
        Ok(match self {
            Template::Classic => html::classic::render(&view),
            Template::Sans => html::sans::render(&view),
            Template::Modern => html::modern::render(&view),
        })
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Render a record into a self-contained markup document.
///
/// `template_id` is matched against [`Template::ALL`]; unknown ids fail
/// with [`RenderError::UnknownTemplate`] naming the valid set.
pub fn render_markup_document(record: &ReceiptRecord, template_id: &str) -> RenderResult<String> {
    Template::from_id(template_id)?.render(record)
}
