use std::ops::Range;

use ropey::Rope;
use thiserror::Error;

use crate::position::{CharIdx, CharLen};

/// Errors occurring during edit batch construction or application.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
	/// Multiple edits target intersecting document regions.
	#[error("overlapping edits at {0}..{1}")]
	OverlappingEdits(CharIdx, CharIdx),
	/// An edit range is reversed (start > end).
	#[error("reversed edit range {0}..{1}")]
	ReversedRange(CharIdx, CharIdx),
	/// An edit range extends past the end of the document.
	#[error("edit range {start}..{end} out of bounds for document of {len} chars")]
	OutOfBounds { start: CharIdx, end: CharIdx, len: CharLen },
}

/// A single text replacement for a character range.
///
/// Replaces `[range.start, range.end)` with `replacement`. [`None`]
/// represents a deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOp {
	/// Character range to replace.
	pub range: Range<CharIdx>,
	/// New text content, or [`None`] for deletion.
	pub replacement: Option<String>,
}

impl EditOp {
	/// Creates a replacement of `range` with `text`.
	pub fn replace(range: Range<CharIdx>, text: impl Into<String>) -> Self {
		Self {
			range,
			replacement: Some(text.into()),
		}
	}

	/// Creates a deletion of `range`.
	pub fn delete(range: Range<CharIdx>) -> Self {
		Self { range, replacement: None }
	}
}

/// An ordered, non-overlapping set of edits applied as one transaction.
///
/// Construction validates the set; application is atomic with respect to
/// offsets computed against the pre-edit document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBatch {
	ops: Vec<EditOp>,
}

impl EditBatch {
	/// Sorts, coalesces adjacent, and validates that edits do not overlap.
	///
	/// # Errors
	///
	/// Returns [`EditError::OverlappingEdits`] if any edits target
	/// intersecting regions, or [`EditError::ReversedRange`] for an edit
	/// with `start > end`.
	pub fn from_ops(mut ops: Vec<EditOp>) -> Result<Self, EditError> {
		if let Some(op) = ops.iter().find(|op| op.range.start > op.range.end) {
			return Err(EditError::ReversedRange(op.range.start, op.range.end));
		}
		ops.sort_by_key(|op| (op.range.start, op.range.end));
		let mut out: Vec<EditOp> = Vec::with_capacity(ops.len());
		for op in ops {
			if let Some(last) = out.last_mut() {
				if op.range.start < last.range.end {
					return Err(EditError::OverlappingEdits(op.range.start, op.range.end));
				}
				if op.range.start == last.range.end {
					last.range.end = op.range.end;
					if let Some(b) = op.replacement {
						last.replacement.get_or_insert_default().push_str(&b);
					}
					continue;
				}
			}
			out.push(op);
		}
		Ok(Self { ops: out })
	}

	/// Returns the edits in document order.
	pub fn ops(&self) -> &[EditOp] {
		&self.ops
	}

	/// Returns true if the batch contains no edits.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.ops.is_empty()
	}

	/// Returns the number of edits in the batch.
	#[inline]
	pub fn len(&self) -> usize {
		self.ops.len()
	}

	/// Applies the batch to a rope.
	///
	/// Edits are spliced bottom-to-top so that offsets computed against the
	/// pre-edit document stay valid throughout.
	///
	/// # Errors
	///
	/// Returns [`EditError::OutOfBounds`] if any edit extends past the end
	/// of the document. The rope is untouched on error.
	pub fn apply(&self, text: &mut Rope) -> Result<(), EditError> {
		let len = text.len_chars();
		if let Some(op) = self.ops.iter().find(|op| op.range.end > len) {
			return Err(EditError::OutOfBounds {
				start: op.range.start,
				end: op.range.end,
				len,
			});
		}
		for op in self.ops.iter().rev() {
			text.remove(op.range.clone());
			if let Some(replacement) = &op.replacement {
				text.insert(op.range.start, replacement);
			}
		}
		Ok(())
	}
}
