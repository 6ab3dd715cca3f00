//! Schema-driven validation and supplier report generation

pub mod csv_report;
pub mod errors;
pub mod excel;
pub mod lookup;
pub mod pipeline;
pub mod projector;
pub mod registry;
pub mod source;
pub mod types;
pub mod validate;

pub use csv_report::{CsvReport, to_csv};
pub use errors::{ErrorKind, ReportError, ReportResult};
pub use excel::XlsxSource;
pub use lookup::LookupIndex;
pub use pipeline::generate_reports;
pub use projector::ReportProjector;
pub use registry::Registry;
pub use source::{MemorySource, RowSource};
pub use types::{FillGrouped, FillMissing, Row, Schema, Table, Value};
pub use validate::{SchemaValidator, TableContext};
