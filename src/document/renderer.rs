//! Document renderers.
//!
//! A [`DocumentRenderer`] encodes a [`DocumentModel`] into bytes. Two reference
//! renderers ship with the engine: [`JsonRenderer`] for machine consumption and
//! [`TextRenderer`] for a fixed-width printable page. Both are deterministic:
//! the same model always encodes to the same bytes.

use crate::error::{EngineError, EngineResult};

use super::model::{
    DocumentModel, FieldBlock, HeaderBlock, LedgerEntry, LedgerTable, NetPayBlock, RowEmphasis,
    Section,
};

/// Encodes a document model into a binary document format.
pub trait DocumentRenderer: Send + Sync {
    /// MIME type of the encoded bytes.
    fn content_type(&self) -> &'static str;

    /// File extension for the encoded bytes, without the dot.
    fn file_extension(&self) -> &'static str;

    /// Encodes the document.
    fn encode(&self, document: &DocumentModel) -> EngineResult<Vec<u8>>;
}

/// Encodes documents as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl DocumentRenderer for JsonRenderer {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }

    fn encode(&self, document: &DocumentModel) -> EngineResult<Vec<u8>> {
        serde_json::to_vec_pretty(document).map_err(|e| EngineError::RenderFailure {
            message: e.to_string(),
        })
    }
}

/// Encodes documents as a fixed-width plain text page.
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    width: usize,
}

impl TextRenderer {
    /// Default page width in characters.
    pub const DEFAULT_WIDTH: usize = 78;

    /// Narrowest page the layout supports.
    pub const MIN_WIDTH: usize = 40;

    /// Creates a renderer with the given page width (clamped to [`Self::MIN_WIDTH`]).
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(Self::MIN_WIDTH),
        }
    }

    /// The page width in characters.
    pub fn width(&self) -> usize {
        self.width
    }

    fn rule(&self, out: &mut String, ch: char) {
        out.extend(std::iter::repeat_n(ch, self.width));
        out.push('\n');
    }

    fn centered(&self, out: &mut String, text: &str) {
        for line in wrap(text, self.width) {
            let line = format!("{:^width$}", line, width = self.width);
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }

    fn header(&self, out: &mut String, header: &HeaderBlock) {
        let indent = header.logo_placeholder.chars().count() + 2;
        self.rule(out, '=');
        out.push_str(&format!(
            "{:<indent$}{}\n",
            header.logo_placeholder, header.organization_name
        ));
        for line in [&header.registration, &header.address, &header.contact] {
            out.push_str(&format!("{:<indent$}{}\n", "", line));
        }
        self.rule(out, '=');
    }

    fn fields(&self, out: &mut String, block: &FieldBlock) {
        out.push_str(&block.heading);
        out.push('\n');
        self.rule(out, '-');
        for row in &block.rows {
            let columns = row.cells.len().max(1);
            let column_width = self.width / columns;
            let mut line = String::new();
            for cell in &row.cells {
                line.push_str(&format!(
                    "{:<column_width$}",
                    format!("{}: {}", cell.label, cell.value)
                ));
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out.push('\n');
    }

    fn ledger(&self, out: &mut String, table: &LedgerTable) {
        let half = (self.width - 3) / 2;
        let side = |entry: &Option<LedgerEntry>| match entry {
            Some(entry) => {
                let amount_width = half.saturating_sub(entry.label.chars().count());
                format!("{}{:>amount_width$}", entry.label, entry.amount)
            }
            None => String::new(),
        };

        self.rule(out, '-');
        out.push_str(&format!(
            "{:<half$} | {}\n",
            table.left_heading, table.right_heading
        ));
        self.rule(out, '-');
        for row in &table.rows {
            if row.emphasis == RowEmphasis::Total {
                self.rule(out, '=');
            }
            let line = format!("{:<half$} | {}", side(&row.left), side(&row.right));
            out.push_str(line.trim_end());
            out.push('\n');
        }
        self.rule(out, '-');
        out.push('\n');
    }

    fn net_pay(&self, out: &mut String, block: &NetPayBlock) {
        let amount_width = self.width.saturating_sub(block.label.chars().count());
        out.push_str(&format!("{}{:>amount_width$}\n", block.label, block.amount));
        for line in wrap(&format!("{}: {}", block.words_label, block.words), self.width) {
            out.push_str(&line);
            out.push('\n');
        }
        self.rule(out, '-');
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH)
    }
}

impl DocumentRenderer for TextRenderer {
    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }

    fn encode(&self, document: &DocumentModel) -> EngineResult<Vec<u8>> {
        let mut out = String::new();
        for section in &document.sections {
            match section {
                Section::Header(header) => self.header(&mut out, header),
                Section::Banner { text } => {
                    self.centered(&mut out, text);
                    self.rule(&mut out, '=');
                    out.push('\n');
                }
                Section::Fields(block) => self.fields(&mut out, block),
                Section::Ledger(table) => self.ledger(&mut out, table),
                Section::NetPay(block) => self.net_pay(&mut out, block),
                Section::Note { text } => {
                    out.push('\n');
                    self.centered(&mut out, text);
                }
            }
        }
        Ok(out.into_bytes())
    }
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::model::{FieldRow, LabeledValue, LedgerRow};

    fn sample_document() -> DocumentModel {
        DocumentModel {
            title: "Payslip - Test - March 2024".to_string(),
            sections: vec![
                Section::Header(HeaderBlock {
                    logo_placeholder: "[LOGO]".to_string(),
                    organization_name: "ACME".to_string(),
                    registration: "Registration No: 1".to_string(),
                    address: "1 Main Street".to_string(),
                    contact: "Tel: 1 | Email: a@b.c".to_string(),
                }),
                Section::Banner {
                    text: "SALARY SLIP".to_string(),
                },
                Section::Fields(FieldBlock {
                    heading: "EMPLOYEE INFORMATION".to_string(),
                    rows: vec![FieldRow {
                        cells: vec![
                            LabeledValue::new("Employee ID", "E001"),
                            LabeledValue::new("Employee Name", "Test Person"),
                        ],
                    }],
                }),
                Section::Ledger(LedgerTable {
                    left_heading: "EARNINGS".to_string(),
                    right_heading: "DEDUCTIONS".to_string(),
                    rows: vec![
                        LedgerRow {
                            left: Some(LedgerEntry::new("Bonus", "RM 10.00")),
                            right: None,
                            emphasis: RowEmphasis::Normal,
                        },
                        LedgerRow {
                            left: Some(LedgerEntry::new("Total Earnings", "RM 10.00")),
                            right: Some(LedgerEntry::new("Total Deductions", "RM 0.00")),
                            emphasis: RowEmphasis::Total,
                        },
                    ],
                }),
                Section::NetPay(NetPayBlock {
                    label: "NET PAY".to_string(),
                    amount: "RM 10.00".to_string(),
                    words_label: "In Words".to_string(),
                    words: "Ten Ringgit Malaysia".to_string(),
                }),
                Section::Note {
                    text: "Generated.".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_json_renderer_round_trips_model() {
        let bytes = JsonRenderer.encode(&sample_document()).unwrap();
        let decoded: DocumentModel = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded, sample_document());
        assert_eq!(JsonRenderer.content_type(), "application/json");
        assert_eq!(JsonRenderer.file_extension(), "json");
    }

    #[test]
    fn test_json_sections_are_tagged() {
        let bytes = JsonRenderer.encode(&sample_document()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["sections"][0]["kind"], "header");
        assert_eq!(value["sections"][1]["kind"], "banner");
        assert_eq!(value["sections"][3]["rows"][1]["emphasis"], "total");
        assert!(value["sections"][3]["rows"][0]["right"].is_null());
    }

    #[test]
    fn test_text_renderer_contains_every_value() {
        let bytes = TextRenderer::default().encode(&sample_document()).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        for expected in [
            "[LOGO]",
            "ACME",
            "Registration No: 1",
            "SALARY SLIP",
            "Employee ID: E001",
            "Employee Name: Test Person",
            "EARNINGS",
            "DEDUCTIONS",
            "Total Deductions",
            "NET PAY",
            "RM 10.00",
            "In Words: Ten Ringgit Malaysia",
            "Generated.",
        ] {
            assert!(text.contains(expected), "missing '{}' in:\n{}", expected, text);
        }
    }

    #[test]
    fn test_text_renderer_respects_width() {
        let renderer = TextRenderer::new(60);
        let text = String::from_utf8(renderer.encode(&sample_document()).unwrap()).unwrap();
        for line in text.lines() {
            assert!(line.chars().count() <= 60, "line too wide: '{}'", line);
        }
    }

    #[test]
    fn test_text_renderer_clamps_width() {
        assert_eq!(TextRenderer::new(10).width(), TextRenderer::MIN_WIDTH);
    }

    #[test]
    fn test_renderers_are_deterministic() {
        let document = sample_document();
        assert_eq!(
            JsonRenderer.encode(&document).unwrap(),
            JsonRenderer.encode(&document).unwrap()
        );
        let text = TextRenderer::default();
        assert_eq!(text.encode(&document).unwrap(), text.encode(&document).unwrap());
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("", 10), vec![""]);
        assert_eq!(wrap("abcdefghijk", 4), vec!["abcdefghijk"]);
    }
}
