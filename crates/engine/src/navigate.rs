use glint_primitives::position::CharIdx;

use crate::scanner::ScanReport;

/// A navigation step through the match list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
	/// First match after the cursor, wrapping to the start.
	Next,
	/// Last match before the cursor, wrapping to the end.
	Previous,
	/// First match in the document.
	First,
}

/// Resolves the target location index for a navigation step.
///
/// Returns [`None`] when the report is empty; navigation over an empty
/// report is a no-op, not an error.
pub fn target_index(report: &ScanReport, cursor: CharIdx, direction: NavDirection) -> Option<usize> {
	match direction {
		NavDirection::Next => next_index(report, cursor),
		NavDirection::Previous => prev_index(report, cursor),
		NavDirection::First => first_index(report),
	}
}

/// Index of the first location starting strictly after the cursor,
/// wrapping to the first location.
pub fn next_index(report: &ScanReport, cursor: CharIdx) -> Option<usize> {
	if report.is_empty() {
		return None;
	}
	report
		.locations()
		.iter()
		.position(|loc| loc.span.start > cursor)
		.or(Some(0))
}

/// Index of the last location starting strictly before the cursor,
/// wrapping to the last location.
pub fn prev_index(report: &ScanReport, cursor: CharIdx) -> Option<usize> {
	if report.is_empty() {
		return None;
	}
	let locations = report.locations();
	locations
		.iter()
		.rposition(|loc| loc.span.start < cursor)
		.or(Some(locations.len() - 1))
}

/// Index of the first location in the document.
pub fn first_index(report: &ScanReport) -> Option<usize> {
	if report.is_empty() { None } else { Some(0) }
}
