//! Record export to standalone JSON files.

mod json_exporter;

pub use json_exporter::{ExportError, JsonExporter};
