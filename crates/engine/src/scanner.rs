use std::ops::Range;

use glint_primitives::position::{CharIdx, char_to_position, line_end_char};
use regex::Regex;
pub use regex::escape as escape_pattern;
use ropey::RopeSlice;
use thiserror::Error;

use crate::config::{Config, LogMethod};

/// Errors occurring while building a detection pattern.
#[derive(Debug, Error)]
pub enum ScanError {
	/// The pattern over the configured methods could not be compiled.
	#[error("invalid detection pattern: {0}")]
	Pattern(#[from] regex::Error),
}

/// A single tracked call found in a document.
///
/// Locations are snapshots: they carry no identity across scans and are
/// replaced wholesale by the next report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchLocation {
	/// Character span from the call to the end of its line.
	pub span: Range<CharIdx>,
	/// Zero-based line of the call.
	pub line: usize,
	/// Zero-based column of the call within its line.
	pub column: usize,
	/// The matched method.
	pub method: LogMethod,
	/// False when a comment marker precedes the call on its line.
	pub is_active: bool,
}

/// Result of scanning a document for tracked calls.
///
/// Locations are in document order, which navigation relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
	locations: Vec<MatchLocation>,
}

impl ScanReport {
	/// The located calls in document order.
	pub fn locations(&self) -> &[MatchLocation] {
		&self.locations
	}

	/// Total number of located calls, commented ones included.
	#[inline]
	pub fn count(&self) -> usize {
		self.locations.len()
	}

	/// Number of located calls that are not commented out.
	pub fn active_count(&self) -> usize {
		self.locations.iter().filter(|loc| loc.is_active).count()
	}

	/// Returns true if no calls were located.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.locations.is_empty()
	}
}

/// Joins the configured methods into a regex alternation.
pub(crate) fn methods_alternation(methods: &[LogMethod]) -> String {
	methods.iter().map(|m| escape_pattern(m.as_str())).collect::<Vec<_>>().join("|")
}

/// The detection pattern over the configured methods.
///
/// Matches `console.<method>(` at a word boundary; the method is captured.
fn detection_pattern(methods: &[LogMethod]) -> String {
	format!(r"\bconsole\.({})\(", methods_alternation(methods))
}

/// Scans a document for tracked calls.
///
/// Returns an empty report without scanning when the config is disabled.
/// A call is classified commented when `//` or `/*` occurs earlier on its
/// line; the heuristic is line-local and does not track block comment
/// closure across lines. Matches immediately preceded by a quote are
/// treated as string literal mentions and skipped.
pub fn scan(text: RopeSlice, config: &Config) -> Result<ScanReport, ScanError> {
	if !config.enabled {
		return Ok(ScanReport::default());
	}

	let re = Regex::new(&detection_pattern(&config.methods))?;
	let text_str: String = text.chars().collect();

	let mut locations = Vec::new();
	for caps in re.captures_iter(&text_str) {
		let Some(m) = caps.get(0) else { continue };
		let Some(method) = caps.get(1).and_then(|g| LogMethod::parse(g.as_str())) else {
			continue;
		};
		if quote_precedes(&text_str, m.start()) {
			continue;
		}

		let start = byte_to_char_offset(&text_str, m.start());
		let pos = char_to_position(text, start);

		let line_start_byte = text_str[..m.start()].rfind('\n').map_or(0, |i| i + 1);
		let before = &text_str[line_start_byte..m.start()];
		let is_active = !before.contains("//") && !before.contains("/*");

		locations.push(MatchLocation {
			span: start..line_end_char(text, pos.line),
			line: pos.line,
			column: pos.column,
			method,
			is_active,
		});
	}

	tracing::trace!(count = locations.len(), "scan complete");
	Ok(ScanReport { locations })
}

/// Returns true when the byte before `at` is a quote character.
fn quote_precedes(text: &str, at: usize) -> bool {
	text[..at].chars().next_back().is_some_and(|c| matches!(c, '"' | '\'' | '`'))
}

pub(crate) fn byte_to_char_offset(s: &str, byte_offset: usize) -> CharIdx {
	s[..byte_offset].chars().count()
}
