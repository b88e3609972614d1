//! Shared helpers for the stringsheet CLI binary.

pub mod source_spec;

pub use source_spec::{SourceSpec, read_source_file};
