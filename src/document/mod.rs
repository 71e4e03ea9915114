//! Payslip document composition and rendering.
//!
//! [`compose_payslip_document`] turns a persisted payslip into a
//! [`DocumentModel`]; a [`DocumentRenderer`] encodes that model into bytes.

mod composer;
mod model;
mod renderer;

pub use composer::{
    EMPLOYEE_INFORMATION_HEADING, PAYSLIP_BANNER, compose_payslip_document, format_currency,
    suggested_file_name,
};
pub use model::{
    DocumentModel, FieldBlock, FieldRow, HeaderBlock, LabeledValue, LedgerEntry, LedgerRow,
    LedgerTable, NetPayBlock, RowEmphasis, Section,
};
pub use renderer::{DocumentRenderer, JsonRenderer, TextRenderer};
