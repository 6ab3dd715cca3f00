//! Supplier report generation from e-commerce order workbooks
//!
//! Validates the "Export orders" and "Product list" sheets of a workbook
//! against their data schemas, joins orders to products, and renders one CSV
//! report per supplier schema.

pub mod cli;
pub mod config;
pub mod reports;

pub use reports::{CsvReport, Registry, ReportError, generate_reports};
