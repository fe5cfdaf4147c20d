//! DOCX placeholder replacement
//!
//! This crate fills Word templates containing `<!key!>` placeholder tokens
//! with caller-supplied values, while preserving the archive structure,
//! the XML formatting runs and whitespace semantics of everything it does
//! not touch.
//!
//! A placeholder may be split across several formatting runs — Word
//! fragments text freely while the author types — so matching happens over
//! each paragraph's concatenated text and replacements are spliced back
//! across the underlying run elements.
//!
//! # Example
//!
//! ```ignore
//! use docx_fill::{fill, FillOptions};
//! use std::collections::HashMap;
//! use std::path::Path;
//!
//! let mut values = HashMap::new();
//! values.insert("company_name".to_string(), "Acme LLC".to_string());
//!
//! let report = fill(
//!     Path::new("template.docx"),
//!     Path::new("out.docx"),
//!     &values,
//!     &FillOptions::default(),
//! )?;
//! assert!(report.replaced_keys.contains("company_name"));
//! ```

mod archive;
mod engine;
mod error;
mod options;
mod part;
mod parts;
mod placeholder;
mod report;
mod rewrite;

pub use engine::{fill, scan};
pub use error::{FillError, FillResult};
pub use options::{FillOptions, MissingKeyPolicy, PartsSelection, WarningSink};
pub use report::{FillReport, PartReport};
