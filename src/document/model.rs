//! Renderer-agnostic document model.
//!
//! A [`DocumentModel`] is an ordered list of typed sections. Every value in it
//! is already formatted text; renderers lay it out but never compute.

use serde::{Deserialize, Serialize};

/// A structured document ready to be encoded by a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentModel {
    /// Document title metadata (not printed as a section).
    pub title: String,
    /// Sections in reading order.
    pub sections: Vec<Section>,
}

impl DocumentModel {
    /// Returns the header block, if present.
    pub fn header(&self) -> Option<&HeaderBlock> {
        self.sections.iter().find_map(|s| match s {
            Section::Header(header) => Some(header),
            _ => None,
        })
    }

    /// Returns the first field block with the given heading.
    pub fn fields(&self, heading: &str) -> Option<&FieldBlock> {
        self.sections.iter().find_map(|s| match s {
            Section::Fields(block) if block.heading == heading => Some(block),
            _ => None,
        })
    }

    /// Returns the ledger table, if present.
    pub fn ledger(&self) -> Option<&LedgerTable> {
        self.sections.iter().find_map(|s| match s {
            Section::Ledger(table) => Some(table),
            _ => None,
        })
    }

    /// Returns the net pay block, if present.
    pub fn net_pay(&self) -> Option<&NetPayBlock> {
        self.sections.iter().find_map(|s| match s {
            Section::NetPay(block) => Some(block),
            _ => None,
        })
    }
}

/// One section of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    /// Organization identity.
    Header(HeaderBlock),
    /// A centered, emphasized title line.
    Banner {
        /// Banner text.
        text: String,
    },
    /// Labeled values laid out in rows.
    Fields(FieldBlock),
    /// A two-sided ledger table (earnings against deductions).
    Ledger(LedgerTable),
    /// The net pay amount and its spelling.
    NetPay(NetPayBlock),
    /// A small centered note.
    Note {
        /// Note text.
        text: String,
    },
}

/// Organization identity block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderBlock {
    /// Placeholder shown where a logo would be.
    pub logo_placeholder: String,
    /// Organization name.
    pub organization_name: String,
    /// Registration line, e.g. `Registration No: 123456-A`.
    pub registration: String,
    /// Postal address.
    pub address: String,
    /// Contact line, e.g. `Tel: ... | Email: ...`.
    pub contact: String,
}

/// A label and its formatted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledValue {
    /// The label, e.g. `Employee ID`.
    pub label: String,
    /// The formatted value.
    pub value: String,
}

impl LabeledValue {
    /// Creates a labeled value.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A row of labeled values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRow {
    /// The cells in the row, left to right.
    pub cells: Vec<LabeledValue>,
}

/// A headed block of labeled rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBlock {
    /// Block heading.
    pub heading: String,
    /// Rows in order.
    pub rows: Vec<FieldRow>,
}

impl FieldBlock {
    /// Finds the value for a label anywhere in the block.
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .find(|cell| cell.label == label)
            .map(|cell| cell.value.as_str())
    }
}

/// Visual emphasis of a ledger row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowEmphasis {
    /// An ordinary line item.
    Normal,
    /// A totals row, drawn bold with a heavy border.
    Total,
}

/// One side of a ledger row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Line item label.
    pub label: String,
    /// Formatted amount.
    pub amount: String,
}

impl LedgerEntry {
    /// Creates a ledger entry.
    pub fn new(label: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            amount: amount.into(),
        }
    }
}

/// A ledger row; either side may be blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Left-hand (earnings) entry.
    pub left: Option<LedgerEntry>,
    /// Right-hand (deductions) entry.
    pub right: Option<LedgerEntry>,
    /// Row emphasis.
    pub emphasis: RowEmphasis,
}

/// A two-column ledger table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTable {
    /// Heading over the left column.
    pub left_heading: String,
    /// Heading over the right column.
    pub right_heading: String,
    /// Rows in order.
    pub rows: Vec<LedgerRow>,
}

/// Net pay block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetPayBlock {
    /// Block label, e.g. `NET PAY`.
    pub label: String,
    /// Formatted net amount.
    pub amount: String,
    /// Label for the spelled-out amount, e.g. `In Words`.
    pub words_label: String,
    /// The amount in words followed by the currency name.
    pub words: String,
}
