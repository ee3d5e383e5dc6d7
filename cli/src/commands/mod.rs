//! Command handlers
//!
//! Each handler takes already-loaded inputs and returns the text to print, so
//! the same code serves the binary and the tests.

mod catalog;
mod filter;
mod load;

pub use catalog::{describe_fields, list_operators};
pub use filter::{FilterReport, VisibleField, render_filter, run_filter};
pub use load::{load_fields, load_rules, load_values};
