//! Scan-and-transform engine for diagnostic log statements.
//!
//! Detection is regex-based over the configured method vocabulary; the bulk
//! rewrites are line-anchored so repeated application cannot corrupt a
//! document. Everything here is pure with respect to the host: callers pass
//! text in and get reports or edit batches out.

/// Bulk rewrite planning: comment, uncomment, delete.
pub mod actions;
/// Configuration vocabulary, defaults, and lenient resolution.
pub mod config;
/// Cyclic navigation over scan results.
pub mod navigate;
/// Regex-based detection of tracked calls.
pub mod scanner;

pub use actions::{ActionError, comment_all, delete_all, uncomment_all};
pub use config::{Config, LogMethod, RawSettings};
pub use navigate::{NavDirection, target_index};
pub use scanner::{MatchLocation, ScanError, ScanReport, scan};
