//! Form schema, records and value bags
//!
//! These are the shapes the REST-backed form layer hands to the filter engine.
//! Raw JSON is converted into typed values here, once, so the comparators never
//! have to guess at the shape of a value.

mod error;
mod types;
mod values;

pub use error::DataError;
pub use types::{FieldDef, FieldOptions, FieldType, RecordRow};
pub use values::{Location, Value, ValueBag};
