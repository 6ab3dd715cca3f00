//! Core types for report generation

mod value;
mod row;
mod schema;

pub use value::*;
pub use row::*;
pub use schema::*;
