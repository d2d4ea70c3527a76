//! Host integration seams.
//!
//! The session never talks to a concrete editor. Everything it needs from
//! the host arrives through these narrow traits, so the whole session can
//! run against an in-memory mock in tests.

use std::ops::Range;

use async_trait::async_trait;
use glint_engine::RawSettings;
use glint_primitives::edit::EditBatch;
use glint_primitives::position::CharIdx;
use ropey::Rope;
use thiserror::Error;

use crate::menu::{MenuAction, MenuItem};

/// Border width hosts use when painting a decoration span.
pub const BORDER_WIDTH: &str = "1px";
/// Border style hosts use when painting a decoration span.
pub const BORDER_STYLE: &str = "solid";
/// Border radius hosts use when painting a decoration span.
pub const BORDER_RADIUS: &str = "2px";

/// Stable identity a host assigns to one open document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

/// Point-in-time copy of one document.
///
/// `version` increases with every text change; two snapshots with the same
/// id and version carry identical text.
#[derive(Debug, Clone)]
pub struct DocumentSnapshot {
	pub id: DocumentId,
	pub version: u64,
	/// Host language identifier, e.g. `"typescript"`.
	pub language: String,
	pub text: Rope,
}

/// Failures reported by the host when the session asks it to act.
#[derive(Debug, Error)]
pub enum HostError {
	/// The document closed between the request and its execution.
	#[error("document {0:?} is no longer open")]
	DocumentClosed(DocumentId),
	/// The host refused or failed the edit transaction.
	#[error("edit transaction rejected: {0}")]
	EditRejected(String),
	/// The settings store refused the update.
	#[error("settings update rejected: {0}")]
	SettingsRejected(String),
}

/// Status indicator content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
	/// Indicator text, possibly carrying host icon markup.
	pub text: String,
	/// Hover detail, only on hosts that support it.
	pub tooltip: Option<String>,
}

/// Visual style for one batch of decoration spans.
///
/// Border geometry is fixed ([`BORDER_WIDTH`], [`BORDER_STYLE`],
/// [`BORDER_RADIUS`]); only the color varies per method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecorationStyle {
	/// Border and overview ruler color.
	pub color: String,
	/// Whether the host should also mark the span in its overview ruler.
	pub overview_ruler: bool,
}

/// Spans sharing one decoration style, painted in a single host call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecorationGroup {
	pub style: DecorationStyle,
	pub spans: Vec<Range<CharIdx>>,
}

/// Read access to the host's document model.
pub trait DocumentAccess {
	/// The focused document, if any.
	fn active_document(&self) -> Option<DocumentSnapshot>;
	/// A document by id, focused or not.
	fn document(&self, id: DocumentId) -> Option<DocumentSnapshot>;
	/// Cursor position in the focused document.
	fn cursor(&self) -> CharIdx;
}

/// Mutations and UI surfaces the host performs on the session's behalf.
///
/// The async methods are suspension points: the session awaits the host
/// and resumes on the same logical thread, so implementations need not be
/// `Send`.
#[async_trait(?Send)]
pub trait EditorSurface {
	/// Applies a batch as one undoable transaction.
	async fn apply_edits(&mut self, doc: DocumentId, batch: EditBatch) -> Result<(), HostError>;
	fn set_cursor(&mut self, doc: DocumentId, pos: CharIdx);
	/// Scrolls the span into view.
	fn reveal(&mut self, doc: DocumentId, span: Range<CharIdx>);
	/// Replaces all decoration groups for the document.
	fn set_decorations(&mut self, doc: DocumentId, groups: Vec<DecorationGroup>);
	fn clear_decorations(&mut self, doc: DocumentId);
	/// Shows the status indicator, or hides it on [`None`].
	fn set_status(&mut self, status: Option<StatusUpdate>);
	/// Presents a quick-pick menu; [`None`] means the user dismissed it.
	async fn show_menu(&mut self, items: Vec<MenuItem>) -> Option<MenuAction>;
	/// Opens the host settings UI at this tool's section.
	fn open_settings(&mut self);
}

/// The host's settings store for this tool's configuration section.
pub trait SettingsStore {
	/// Current raw settings as the host stores them.
	fn snapshot(&self) -> RawSettings;
	/// Writes one key at global (user) scope.
	fn update_global(&mut self, key: &str, value: serde_json::Value) -> Result<(), HostError>;
}
