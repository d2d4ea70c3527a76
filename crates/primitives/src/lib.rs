//! Core types for the annotation engine: text coordinates and batched edits.

/// Batched edit types: operations, validation, and atomic application.
pub mod edit;
/// Text coordinate types and rope position math.
pub mod position;

pub use edit::{EditBatch, EditError, EditOp};
pub use position::{CharIdx, CharLen, Position};
pub use ropey::{Rope, RopeSlice};
