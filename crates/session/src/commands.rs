//! The command surface hosts bind to keybindings, menus, and code actions.

use std::ops::Range;

use glint_primitives::position::CharIdx;

/// A user-invocable operation on the active document.
///
/// The bulk operations optionally carry a character-range scope; `None`
/// means the whole document. Scopes are widened outward to whole-line
/// boundaries before matching, so a scope anywhere on a line covers that
/// full line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	/// Open the quick-pick action menu.
	ShowMenu,
	/// Move the cursor to the next match after it, wrapping to the first.
	NextMatch,
	/// Move the cursor to the last match before it, wrapping to the last.
	PreviousMatch,
	/// Paint decorations for the current matches, `keepHighlights` or not.
	HighlightMatches,
	/// Comment out every active tracked call in scope.
	CommentAll(Option<Range<CharIdx>>),
	/// Uncomment every line-commented tracked call in scope.
	UncommentAll(Option<Range<CharIdx>>),
	/// Delete every line carrying a tracked call in scope.
	DeleteAll(Option<Range<CharIdx>>),
}
