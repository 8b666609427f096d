//! Printer directive vocabulary
//!
//! The command stream is an ordered list of these directives, independent
//! of any specific printer's native protocol. A downstream driver
//! integration serializes them (ESC/POS, StarPRNT, ...); the variants are
//! serde-tagged so the stream can also cross a process boundary as JSON.

use serde::{Deserialize, Serialize};

/// Horizontal alignment for subsequent output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
}

/// Text size for subsequent output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    Normal,
    /// Double width and height
    Double,
}

/// Alignment of a single table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAlign {
    Left,
    Right,
}

/// One column of a table row. `width` is the fraction of the printable
/// line; the fractions of a row sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableColumn {
    pub text: String,
    pub align: ColumnAlign,
    pub width: f32,
}

impl TableColumn {
    pub fn left(text: impl Into<String>, width: f32) -> Self {
        Self {
            text: text.into(),
            align: ColumnAlign::Left,
            width,
        }
    }

    pub fn right(text: impl Into<String>, width: f32) -> Self {
        Self {
            text: text.into(),
            align: ColumnAlign::Right,
            width,
        }
    }
}

/// QR error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QrCorrection {
    Low,
    Medium,
    Quartile,
    High,
}

/// QR rendering parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QrOptions {
    /// Module size in dots (1-16).
    pub cell_size: u8,
    pub correction: QrCorrection,
    /// QR model (2 for common thermal printers).
    pub model: u8,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            cell_size: 4,
            correction: QrCorrection::Low,
            model: 2,
        }
    }
}

/// A single printer directive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Directive {
    Align { align: Align },
    Bold { on: bool },
    TextSize { size: TextSize },
    Line { text: String },
    Table { columns: Vec<TableColumn> },
    Separator,
    Qr { payload: String, options: QrOptions },
    /// 1-bit raster image, rows packed MSB-first.
    Image {
        width: u32,
        height: u32,
        bitmap: Vec<u8>,
    },
    Feed { lines: u8 },
    Cut,
}

/// The rendered command stream, sized to the configured character count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandSequence {
    /// Printable characters per line the stream was laid out for.
    pub chars_per_line: usize,
    pub directives: Vec<Directive>,
}

impl CommandSequence {
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Directive> {
        self.directives.iter()
    }

    /// All `Line` and `Table` text in stream order (test and debug helper).
    pub fn visible_text(&self) -> Vec<String> {
        let mut out = Vec::new();
        for d in &self.directives {
            match d {
                Directive::Line { text } => out.push(text.clone()),
                Directive::Table { columns } => {
                    for c in columns {
                        out.push(c.text.clone());
                    }
                }
                _ => {}
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_wire_shape() {
        let d = Directive::Align {
            align: Align::Center,
        };
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["op"], "align");
        assert_eq!(json["align"], "center");

        let d = Directive::Qr {
            payload: "https://example.test/r/1".to_string(),
            options: QrOptions::default(),
        };
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["op"], "qr");
        assert_eq!(json["options"]["cell_size"], 4);
    }

    #[test]
    fn test_table_column_fractions() {
        let row = vec![
            TableColumn::left("2 x $4.99", 0.6),
            TableColumn::right("$9.98", 0.4),
        ];
        let sum: f32 = row.iter().map(|c| c.width).sum();
        assert!((sum - 1.0).abs() < f32::EPSILON);
    }
}
