//! Row validation against data schemas

mod context;
mod validator;

pub use context::TableContext;
pub use validator::SchemaValidator;
