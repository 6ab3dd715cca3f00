pub mod generate;
pub mod schemas;
