//! Line-scoped quick fixes.
//!
//! When the cursor line carries an active tracked call, the host can offer
//! to comment or delete just that line. The returned commands carry the
//! line's character range as their scope, so the fix never touches the
//! rest of the document.

use glint_engine::{Config, ScanError, scan};
use ropey::RopeSlice;

use crate::commands::Command;

/// A quick fix the host can surface on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeAction {
	/// Human-readable fix title.
	pub title: String,
	/// The command to run when the fix is accepted.
	pub command: Command,
}

/// Quick fixes for one line of a document.
///
/// Returns an empty list when the line is out of range, carries no tracked
/// call, or carries only commented ones.
pub fn actions_for_line(
	text: RopeSlice,
	config: &Config,
	line: usize,
) -> Result<Vec<CodeAction>, ScanError> {
	if line >= text.len_lines() {
		return Ok(Vec::new());
	}

	let report = scan(text.line(line), config)?;
	if !report.locations().iter().any(|loc| loc.is_active) {
		return Ok(Vec::new());
	}

	// Include the terminator so a delete removes the whole line.
	let scope = text.line_to_char(line)..text.line_to_char(line + 1);
	Ok(vec![
		CodeAction {
			title: "Comment out this log".to_string(),
			command: Command::CommentAll(Some(scope.clone())),
		},
		CodeAction {
			title: "Delete this log".to_string(),
			command: Command::DeleteAll(Some(scope)),
		},
	])
}

#[cfg(test)]
mod tests {
	use glint_primitives::Rope;
	use pretty_assertions::assert_eq;

	use super::*;

	const DOC: &str = "const x = 1;\nconsole.log(x);\n// console.warn(x);\n";

	#[test]
	fn test_active_call_offers_comment_and_delete() {
		let doc = Rope::from(DOC);
		let actions = actions_for_line(doc.slice(..), &Config::default(), 1).unwrap();
		assert_eq!(actions.len(), 2);
		assert_eq!(actions[0].title, "Comment out this log");
		assert_eq!(actions[1].title, "Delete this log");
	}

	#[test]
	fn test_actions_are_scoped_to_the_line() {
		let doc = Rope::from(DOC);
		let actions = actions_for_line(doc.slice(..), &Config::default(), 1).unwrap();
		// Line 1 spans chars 13..29 including its terminator.
		let expected = doc.line_to_char(1)..doc.line_to_char(2);
		assert_eq!(actions[0].command, Command::CommentAll(Some(expected.clone())));
		assert_eq!(actions[1].command, Command::DeleteAll(Some(expected)));
	}

	#[test]
	fn test_plain_line_offers_nothing() {
		let doc = Rope::from(DOC);
		let actions = actions_for_line(doc.slice(..), &Config::default(), 0).unwrap();
		assert!(actions.is_empty());
	}

	#[test]
	fn test_commented_call_offers_nothing() {
		let doc = Rope::from(DOC);
		let actions = actions_for_line(doc.slice(..), &Config::default(), 2).unwrap();
		assert!(actions.is_empty());
	}

	#[test]
	fn test_line_out_of_range_offers_nothing() {
		let doc = Rope::from(DOC);
		let actions = actions_for_line(doc.slice(..), &Config::default(), 99).unwrap();
		assert!(actions.is_empty());
	}

	#[test]
	fn test_untracked_method_offers_nothing() {
		let doc = Rope::from("console.debug(1);\n");
		// Default methods do not include debug.
		let actions = actions_for_line(doc.slice(..), &Config::default(), 0).unwrap();
		assert!(actions.is_empty());
	}
}
