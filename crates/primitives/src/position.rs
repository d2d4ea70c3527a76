use ropey::RopeSlice;

/// A position in the text, measured in characters (not bytes).
///
/// This is the canonical coordinate space for glint.
pub type CharIdx = usize;

/// A length or count in the text, measured in characters (not bytes).
///
/// This is distinct from CharIdx to avoid accidentally passing an index
/// where a length is expected or vice versa.
pub type CharLen = usize;

/// A position in line/column coordinates.
///
/// Both fields are zero-based and measured in characters. This is the
/// coordinate space reported to hosts; [`CharIdx`] is what the engine
/// computes with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
	/// Zero-based line index.
	pub line: usize,
	/// Zero-based character offset in the line.
	pub column: usize,
}

impl Position {
	/// Creates a new position.
	pub const fn new(line: usize, column: usize) -> Self {
		Self { line, column }
	}
}

/// Converts a character offset to line/column coordinates.
///
/// Offsets past the end of the text clamp to the final position.
pub fn char_to_position(text: RopeSlice, idx: CharIdx) -> Position {
	let idx = idx.min(text.len_chars());
	let line = text.char_to_line(idx);
	Position::new(line, idx - text.line_to_char(line))
}

/// Converts line/column coordinates to a character offset.
///
/// Lines past the end of the text clamp to the text end; columns past the
/// end of the line clamp to the line end (before the terminator).
pub fn position_to_char(text: RopeSlice, pos: Position) -> CharIdx {
	if pos.line >= text.len_lines() {
		return text.len_chars();
	}
	text.line_to_char(pos.line) + pos.column.min(line_content_len(text, pos.line))
}

/// Returns the character offset just past the last content character of a
/// line, excluding its terminator.
pub fn line_end_char(text: RopeSlice, line: usize) -> CharIdx {
	text.line_to_char(line) + line_content_len(text, line)
}

/// Returns the length of a line in characters, excluding its terminator.
pub fn line_content_len(text: RopeSlice, line: usize) -> CharLen {
	let slice = text.line(line);
	let mut len = slice.len_chars();
	if len > 0 && slice.char(len - 1) == '\n' {
		len -= 1;
	}
	if len > 0 && slice.char(len - 1) == '\r' {
		len -= 1;
	}
	len
}
