//! Excel workbook input

mod reader;

pub use reader::{XlsxSource, file_stem};
