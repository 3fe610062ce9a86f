#![forbid(unsafe_code)]

//! Core domain model and business logic for the Liftplan program designer.
//!
//! This crate provides:
//! - Domain types (exercise definitions, programs, weeks, days, entries)
//! - Exercise catalog loading and filtering
//! - The program book with index-addressed editing operations
//! - JSON and CSV export
//! - Session, configuration and logging plumbing

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod program;
pub mod export;
pub mod session;

// Re-export commonly used types
pub use error::{Error, Level, Result};
pub use types::*;
pub use catalog::{CatalogFilter, ExerciseCatalog, ALL};
pub use config::Config;
pub use program::ProgramBook;
pub use export::{
    export_file_name, from_json, save_program, to_csv, to_json, write_export, ExportFormat,
};
pub use session::Session;
