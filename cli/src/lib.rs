//! Command-line front end for the formbase filter engine
//!
//! Loads a form schema, the latest saved record and a rule list from JSON
//! files, applies the rules, and prints the fields that remain visible.

mod app;
pub mod commands;
pub mod core;
