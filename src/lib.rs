//! Payroll Generation Engine
//!
//! This crate computes payslips for an employee and a monthly pay period,
//! guarantees at most one payslip per employee and period, and composes
//! payslips into a renderer-agnostic document model.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod document;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
