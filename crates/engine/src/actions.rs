use std::ops::Range;

use glint_primitives::edit::{EditBatch, EditError, EditOp};
use glint_primitives::position::CharIdx;
use regex::{Captures, Regex};
use ropey::RopeSlice;
use thiserror::Error;

use crate::config::Config;
use crate::scanner::{byte_to_char_offset, methods_alternation};

/// Errors occurring while planning a bulk rewrite.
#[derive(Debug, Error)]
pub enum ActionError {
	/// The rewrite pattern could not be compiled.
	#[error("invalid rewrite pattern: {0}")]
	Pattern(#[from] regex::Error),
	/// The planned edits failed validation.
	#[error(transparent)]
	Edit(#[from] EditError),
}

/// Plans commenting out every tracked call that starts its own line.
///
/// Each matched line `<indent>console.<m>(...)` becomes
/// `<indent>// console.<m>(...)`. A call must directly follow the line's
/// indentation to match, so already commented lines never re-match and a
/// second run is a no-op.
pub fn comment_all(
	text: RopeSlice,
	config: &Config,
	scope: Option<Range<CharIdx>>,
) -> Result<EditBatch, ActionError> {
	let pattern = format!(
		r"(?m)^([ \t]*)(console\.(?:{})\(.*\);?)",
		methods_alternation(&config.methods)
	);
	rewrite(text, scope, &pattern, |caps| {
		let indent = caps.get(1).map_or("", |g| g.as_str());
		let call = caps.get(2).map_or("", |g| g.as_str());
		Some(format!("{indent}// {call}"))
	})
}

/// Plans uncommenting every line-commented tracked call.
///
/// Each matched line `<indent>// console.<m>(...)` becomes
/// `<indent>console.<m>(...)`; the comment token and its trailing spacing
/// are removed, so a comment/uncomment round trip restores the line
/// verbatim.
pub fn uncomment_all(
	text: RopeSlice,
	config: &Config,
	scope: Option<Range<CharIdx>>,
) -> Result<EditBatch, ActionError> {
	let pattern = format!(
		r"(?m)^([ \t]*)//[ \t]*(console\.(?:{})\(.*\);?)",
		methods_alternation(&config.methods)
	);
	rewrite(text, scope, &pattern, |caps| {
		let indent = caps.get(1).map_or("", |g| g.as_str());
		let call = caps.get(2).map_or("", |g| g.as_str());
		Some(format!("{indent}{call}"))
	})
}

/// Plans deleting every line that carries a tracked call, commented or not.
///
/// The whole line is removed including its terminator. Text on the line
/// after the call statement survives on a now shortened line; a second run
/// finds nothing left to delete.
pub fn delete_all(
	text: RopeSlice,
	config: &Config,
	scope: Option<Range<CharIdx>>,
) -> Result<EditBatch, ActionError> {
	let pattern = format!(
		r"(?m)^.*console\.(?:{})\(.*\);?(?:\r?\n)?",
		methods_alternation(&config.methods)
	);
	rewrite(text, scope, &pattern, |_| None)
}

/// Runs a line-anchored pattern over the scoped text and collects one edit
/// per match.
///
/// The scope is widened outward to whole-line boundaries first, so `(?m)`
/// anchors keep their meaning; match offsets are rebased into document
/// coordinates. A `None` replacement deletes the match.
fn rewrite(
	text: RopeSlice,
	scope: Option<Range<CharIdx>>,
	pattern: &str,
	replacement: impl Fn(&Captures) -> Option<String>,
) -> Result<EditBatch, ActionError> {
	let (base, scoped) = match scope {
		Some(scope) => {
			let snapped = snap_to_lines(text, scope);
			(snapped.start, text.slice(snapped).to_string())
		}
		None => (0, text.to_string()),
	};

	let re = Regex::new(pattern)?;
	let mut ops = Vec::new();
	for caps in re.captures_iter(&scoped) {
		let Some(m) = caps.get(0) else { continue };
		let start = base + byte_to_char_offset(&scoped, m.start());
		let end = base + byte_to_char_offset(&scoped, m.end());
		let op = match replacement(&caps) {
			Some(new_text) => EditOp::replace(start..end, new_text),
			None => EditOp::delete(start..end),
		};
		ops.push(op);
	}

	tracing::debug!(edits = ops.len(), "bulk rewrite planned");
	Ok(EditBatch::from_ops(ops)?)
}

/// Widens a scope outward to whole-line boundaries.
///
/// The result starts at the beginning of the line containing the scope
/// start and ends just past the terminator of the line containing the last
/// scoped character. An empty scope snaps to the single line around it.
fn snap_to_lines(text: RopeSlice, scope: Range<CharIdx>) -> Range<CharIdx> {
	let len = text.len_chars();
	let start = scope.start.min(len);
	let end = scope.end.clamp(start, len);

	let start_line = text.char_to_line(start);
	let last = if end > start { end - 1 } else { start };
	let end_line = text.char_to_line(last);

	text.line_to_char(start_line)..text.line_to_char(end_line + 1)
}

#[cfg(test)]
mod tests {
	use glint_primitives::Rope;
	use pretty_assertions::assert_eq;
	use proptest::prelude::*;

	use super::*;
	use crate::config::LogMethod;

	fn apply(
		text: &str,
		config: &Config,
		op: fn(RopeSlice, &Config, Option<Range<CharIdx>>) -> Result<EditBatch, ActionError>,
		scope: Option<Range<CharIdx>>,
	) -> String {
		let mut rope = Rope::from(text);
		let batch = op(rope.slice(..), config, scope).unwrap();
		batch.apply(&mut rope).unwrap();
		rope.to_string()
	}

	#[test]
	fn test_comment_all() {
		let out = apply(
			"console.log(\"test\");\nconsole.warn(\"warning\");",
			&Config::default(),
			comment_all,
			None,
		);
		assert_eq!(out, "// console.log(\"test\");\n// console.warn(\"warning\");");
	}

	#[test]
	fn test_comment_all_preserves_indentation() {
		let out = apply(
			"\tconsole.log(1);\n    console.warn(2);\n",
			&Config::default(),
			comment_all,
			None,
		);
		assert_eq!(out, "\t// console.log(1);\n    // console.warn(2);\n");
	}

	#[test]
	fn test_comment_all_is_idempotent() {
		let config = Config::default();
		let once = apply("console.log(1);\nother();\n", &config, comment_all, None);
		let twice = apply(&once, &config, comment_all, None);
		assert_eq!(once, twice);
		assert_eq!(twice, "// console.log(1);\nother();\n");
	}

	#[test]
	fn test_comment_all_skips_calls_after_code() {
		// Only calls that start their own line are commented.
		let out = apply(
			"const x = 1; console.log(x);\nconsole.log(2);\n",
			&Config::default(),
			comment_all,
			None,
		);
		assert_eq!(out, "const x = 1; console.log(x);\n// console.log(2);\n");
	}

	#[test]
	fn test_uncomment_all() {
		let out = apply(
			"// console.log(\"test\");\n// console.warn(\"warning\");",
			&Config::default(),
			uncomment_all,
			None,
		);
		assert_eq!(out, "console.log(\"test\");\nconsole.warn(\"warning\");");
	}

	#[test]
	fn test_uncomment_all_handles_tight_and_spaced_comments() {
		let out = apply(
			"//console.log(1);\n  //   console.warn(2);\n",
			&Config::default(),
			uncomment_all,
			None,
		);
		assert_eq!(out, "console.log(1);\n  console.warn(2);\n");
	}

	#[test]
	fn test_comment_uncomment_roundtrip() {
		let original = "\tconsole.log(1);\nconst a = 2;\n  console.warn(a);\n";
		let config = Config::default();
		let commented = apply(original, &config, comment_all, None);
		let restored = apply(&commented, &config, uncomment_all, None);
		assert_eq!(restored, original);
	}

	#[test]
	fn test_delete_all() {
		let out = apply(
			"const x = 10;\nconsole.log(x);\nconst y = 20;",
			&Config::default(),
			delete_all,
			None,
		);
		assert_eq!(out, "const x = 10;\nconst y = 20;");
	}

	#[test]
	fn test_delete_all_removes_commented_lines_too() {
		let out = apply(
			"// console.log(1);\nkeep();\n",
			&Config::default(),
			delete_all,
			None,
		);
		assert_eq!(out, "keep();\n");
	}

	#[test]
	fn test_delete_all_consecutive_lines() {
		let out = apply(
			"console.log(1);\nconsole.log(2);\nconsole.log(3);\nrest();\n",
			&Config::default(),
			delete_all,
			None,
		);
		assert_eq!(out, "rest();\n");
	}

	#[test]
	fn test_delete_all_leaves_trailing_comment_remainder() {
		// The match ends at the statement, so a trailing comment survives
		// on the shortened line.
		let out = apply(
			"console.log(x); // note\n",
			&Config::default(),
			delete_all,
			None,
		);
		assert_eq!(out, " // note\n");
	}

	#[test]
	fn test_delete_all_takes_whole_line_with_leading_code() {
		let out = apply(
			"const x = 1; console.log(x);\nkeep();\n",
			&Config::default(),
			delete_all,
			None,
		);
		assert_eq!(out, "keep();\n");
	}

	#[test]
	fn test_method_filter_limits_rewrites() {
		let config = Config {
			methods: vec![LogMethod::Error],
			..Config::default()
		};
		let out = apply(
			"console.log(\"keep me\");\nconsole.error(\"comment me\");",
			&config,
			comment_all,
			None,
		);
		assert_eq!(out, "console.log(\"keep me\");\n// console.error(\"comment me\");");
	}

	#[test]
	fn test_crlf_lines_round_trip() {
		let original = "console.log(1);\r\nconst a = 2;\r\n";
		let config = Config::default();
		let commented = apply(original, &config, comment_all, None);
		assert_eq!(commented, "// console.log(1);\r\nconst a = 2;\r\n");
		let restored = apply(&commented, &config, uncomment_all, None);
		assert_eq!(restored, original);
	}

	#[test]
	fn test_crlf_delete_removes_terminator() {
		let out = apply(
			"console.log(1);\r\nkeep();\r\n",
			&Config::default(),
			delete_all,
			None,
		);
		assert_eq!(out, "keep();\r\n");
	}

	#[test]
	fn test_no_matches_yields_empty_batch() {
		let rope = Rope::from("let a = 1;\n");
		let batch = comment_all(rope.slice(..), &Config::default(), None).unwrap();
		assert!(batch.is_empty());
	}

	#[test]
	fn test_multiline_call_is_left_alone() {
		// Without a closing paren on the call line, the line pattern does
		// not match; the call survives a comment pass.
		let original = "console.log(\n  \"split\"\n);\n";
		let out = apply(original, &Config::default(), comment_all, None);
		assert_eq!(out, original);
	}

	#[test]
	fn test_scoped_comment_only_touches_scoped_lines() {
		let text = "console.log(1);\nconsole.log(2);\nconsole.log(3);\n";
		let line2_start = "console.log(1);\n".chars().count();
		let line2_end = line2_start + "console.log(2);".chars().count();
		let out = apply(
			text,
			&Config::default(),
			comment_all,
			Some(line2_start..line2_end),
		);
		assert_eq!(out, "console.log(1);\n// console.log(2);\nconsole.log(3);\n");
	}

	#[test]
	fn test_scope_snaps_outward_to_line_boundaries() {
		// A scope starting and ending mid-line still covers both lines.
		let text = "console.log(1);\nconsole.log(2);\nconsole.log(3);\n";
		let out = apply(text, &Config::default(), comment_all, Some(3..20));
		assert_eq!(out, "// console.log(1);\n// console.log(2);\nconsole.log(3);\n");
	}

	#[test]
	fn test_scoped_delete_includes_terminator() {
		let text = "keep();\nconsole.log(2);\nkeep2();\n";
		let scope_start = "keep();\n".chars().count();
		let out = apply(
			text,
			&Config::default(),
			delete_all,
			Some(scope_start..scope_start + 4),
		);
		assert_eq!(out, "keep();\nkeep2();\n");
	}

	#[test]
	fn test_empty_scope_snaps_to_its_line() {
		let text = "console.log(1);\nconsole.log(2);\n";
		let mid_line2 = "console.log(1);\n".chars().count() + 3;
		let out = apply(
			text,
			&Config::default(),
			comment_all,
			Some(mid_line2..mid_line2),
		);
		assert_eq!(out, "console.log(1);\n// console.log(2);\n");
	}

	#[test]
	fn test_scope_past_end_is_clamped() {
		let text = "console.log(1);";
		let out = apply(text, &Config::default(), comment_all, Some(0..9999));
		assert_eq!(out, "// console.log(1);");
	}

	/// Lines that a generated document can be built from.
	fn arb_line() -> impl Strategy<Value = String> {
		prop_oneof![
			Just("const value = 42;".to_string()),
			Just("doWork();".to_string()),
			Just(String::new()),
			("[ \t]{0,4}", prop_oneof!["log", "warn", "error", "info"], "[a-z0-9]{0,8}")
				.prop_map(|(indent, method, arg)| format!(
					"{indent}console.{method}(\"{arg}\");"
				)),
		]
	}

	fn arb_document() -> impl Strategy<Value = String> {
		prop::collection::vec(arb_line(), 0..12).prop_map(|lines| {
			let mut doc = lines.join("\n");
			if !doc.is_empty() {
				doc.push('\n');
			}
			doc
		})
	}

	proptest! {
		/// A second comment pass over any document changes nothing.
		#[test]
		fn prop_comment_all_idempotent(doc in arb_document()) {
			let config = Config::default();
			let once = apply(&doc, &config, comment_all, None);
			let twice = apply(&once, &config, comment_all, None);
			prop_assert_eq!(once, twice);
		}

		/// Comment then uncomment restores documents without pre-commented
		/// calls verbatim.
		#[test]
		fn prop_comment_uncomment_roundtrip(doc in arb_document()) {
			let config = Config::default();
			let commented = apply(&doc, &config, comment_all, None);
			let restored = apply(&commented, &config, uncomment_all, None);
			prop_assert_eq!(restored, doc);
		}

		/// After a delete pass, a second delete pass plans no edits.
		#[test]
		fn prop_delete_all_idempotent(doc in arb_document()) {
			let config = Config::default();
			let deleted = apply(&doc, &config, delete_all, None);
			let rope = Rope::from(deleted.as_str());
			let batch = delete_all(rope.slice(..), &config, None).unwrap();
			prop_assert!(batch.is_empty());
		}

		/// Deleting removes exactly the matched lines and keeps the rest in
		/// order.
		#[test]
		fn prop_delete_all_preserves_other_lines(doc in arb_document()) {
			let config = Config::default();
			let deleted = apply(&doc, &config, delete_all, None);
			let survivors: Vec<&str> = doc
				.lines()
				.filter(|line| !line.contains("console."))
				.collect();
			let remaining: Vec<&str> = deleted.lines().collect();
			prop_assert_eq!(remaining, survivors);
		}
	}
}
