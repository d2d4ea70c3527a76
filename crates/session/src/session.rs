//! The session: one struct owning all state the host integration needs.
//!
//! Events arrive as [`HostEvent`] values on one logical thread; the only
//! suspension points are the debounce timer and the host's async surfaces
//! (edit transactions and menus). Teardown releases every UI surface the
//! session touched.

use std::ops::Range;

use glint_engine::{
	ActionError, Config, NavDirection, ScanReport, comment_all, delete_all, scan, target_index,
	uncomment_all,
};
use glint_primitives::edit::EditBatch;
use glint_primitives::position::CharIdx;
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::capabilities::Capabilities;
use crate::code_action::{self, CodeAction};
use crate::commands::Command;
use crate::debounce::{RescanDebouncer, RescanPoll};
use crate::host::{
	DecorationGroup, DecorationStyle, DocumentAccess, DocumentId, DocumentSnapshot, EditorSurface,
	SettingsStore, StatusUpdate,
};
use crate::menu::{self, MenuAction};

/// Languages the annotation surfaces attach to.
const SUPPORTED_LANGUAGES: [&str; 4] =
	["javascript", "typescript", "javascriptreact", "typescriptreact"];

fn is_supported_language(language: &str) -> bool {
	SUPPORTED_LANGUAGES.contains(&language)
}

/// An occurrence in the host the session reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
	/// The document's text changed; `version` is the post-change version.
	DocumentChanged { doc: DocumentId, version: u64 },
	/// Focus moved to another editor, or to none.
	ActiveEditorChanged,
	/// The cursor or selection moved.
	SelectionChanged,
	/// This tool's settings section changed.
	ConfigChanged,
	/// The document is about to be saved.
	WillSave { doc: DocumentId },
	/// A command was invoked.
	Command(Command),
}

/// How a completed scan surfaces decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Paint {
	/// Honor `keep_highlights`.
	Auto,
	/// Paint regardless; the user asked for highlights explicitly.
	Force,
}

/// Which bulk rewrite to plan.
#[derive(Debug, Clone, Copy)]
enum Rewrite {
	Comment,
	Uncomment,
	Delete,
}

/// All state for one host connection.
pub struct Session<H> {
	host: H,
	capabilities: Capabilities,
	config: Config,
	/// Most recent completed scan and the document it describes.
	report: Option<(DocumentId, ScanReport)>,
	/// Document version covered by the last scan; suppresses change events
	/// that carry nothing new.
	scanned: Option<(DocumentId, u64)>,
	debouncer: RescanDebouncer,
}

impl<H> Session<H>
where
	H: DocumentAccess + EditorSurface + SettingsStore,
{
	/// Creates a session over a host, resolving config from its settings.
	pub fn new(host: H, capabilities: Capabilities) -> Self {
		let config = Config::resolve(&host.snapshot());
		Self {
			host,
			capabilities,
			config,
			report: None,
			scanned: None,
			debouncer: RescanDebouncer::new(),
		}
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn host(&self) -> &H {
		&self.host
	}

	pub fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}

	/// The last completed scan of the active document.
	pub fn report(&self) -> Option<&ScanReport> {
		self.report.as_ref().map(|(_, report)| report)
	}

	/// Dispatches one host event.
	pub async fn handle(&mut self, event: HostEvent) {
		match event {
			HostEvent::DocumentChanged { doc, version } => {
				if self.scanned == Some((doc, version)) {
					// Change event for a version already scanned, e.g. an
					// echo of an edit batch this session applied.
					return;
				}
				self.debouncer.schedule(doc, Instant::now(), self.config.debounce);
			}
			HostEvent::ActiveEditorChanged => {
				// A pending rescan for the old document goes stale and is
				// discarded when its deadline fires.
				self.rescan_active(Paint::Auto);
			}
			HostEvent::SelectionChanged => {
				// Cursor position is read on demand; nothing cached to
				// refresh.
			}
			HostEvent::ConfigChanged => {
				self.config = Config::resolve(&self.host.snapshot());
				self.rescan_active(Paint::Auto);
			}
			HostEvent::WillSave { doc } => self.cleanup_on_save(doc).await,
			HostEvent::Command(command) => self.run_command(command).await,
		}
	}

	/// The instant the pending debounced rescan comes due, if any.
	pub fn next_deadline(&self) -> Option<Instant> {
		self.debouncer.deadline()
	}

	/// Checks the debounce deadline and rescans when it is due.
	pub fn tick(&mut self) {
		let active = self.host.active_document();
		match self.debouncer.poll(Instant::now(), active.as_ref().map(|d| d.id)) {
			RescanPoll::Due { doc } => {
				if let Some(d) = &active
					&& self.scanned == Some((d.id, d.version))
				{
					// An immediate scan already covered this version.
					return;
				}
				tracing::trace!(?doc, "debounced rescan due");
				self.rescan_active(Paint::Auto);
			}
			RescanPoll::Idle | RescanPoll::Waiting { .. } => {}
		}
	}

	/// Drives the session from an event stream until the sender drops.
	///
	/// Between events the loop sleeps until the debounce deadline, so due
	/// rescans fire without host cooperation. Returns the session after
	/// teardown so the embedder can reclaim the host.
	pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<HostEvent>) -> Self {
		loop {
			tokio::select! {
				biased;
				maybe_event = events.recv() => {
					match maybe_event {
						Some(event) => self.handle(event).await,
						None => break,
					}
				}
				_ = wait_until(self.next_deadline()) => self.tick(),
			}
		}
		self.shutdown();
		self
	}

	/// Releases every UI surface the session touched.
	pub fn shutdown(&mut self) {
		self.debouncer.cancel();
		if let Some((doc, _)) = self.report.take() {
			self.host.clear_decorations(doc);
		}
		self.host.set_status(None);
		self.scanned = None;
	}

	/// Quick fixes for a line of the active document.
	///
	/// Empty on hosts without a code-action surface and for documents in
	/// unsupported languages.
	pub fn code_actions_for(&self, line: usize) -> Vec<CodeAction> {
		if !self.capabilities.code_actions {
			return Vec::new();
		}
		let Some(doc) = self.host.active_document() else {
			return Vec::new();
		};
		if !is_supported_language(&doc.language) {
			return Vec::new();
		}
		match code_action::actions_for_line(doc.text.slice(..), &self.config, line) {
			Ok(actions) => actions,
			Err(e) => {
				tracing::warn!(doc = ?doc.id, error = %e, "code action scan failed");
				Vec::new()
			}
		}
	}

	/// Runs one command against the active document.
	async fn run_command(&mut self, command: Command) {
		match command {
			Command::ShowMenu => self.show_menu().await,
			Command::NextMatch => self.navigate(NavDirection::Next),
			Command::PreviousMatch => self.navigate(NavDirection::Previous),
			Command::HighlightMatches => self.rescan_active(Paint::Force),
			Command::CommentAll(scope) => self.bulk_edit(Rewrite::Comment, scope).await,
			Command::UncommentAll(scope) => self.bulk_edit(Rewrite::Uncomment, scope).await,
			Command::DeleteAll(scope) => self.bulk_edit(Rewrite::Delete, scope).await,
		}
	}

	async fn show_menu(&mut self) {
		let items = menu::build(&self.config, &self.capabilities);
		let Some(action) = self.host.show_menu(items).await else {
			// Dismissed.
			return;
		};
		match action {
			MenuAction::ToggleKeepHighlights => self.toggle_keep_highlights(),
			MenuAction::LocateFirst => {
				// Jump first; the forced rescan then paints the revealed
				// viewport.
				self.navigate(NavDirection::First);
				self.rescan_active(Paint::Force);
			}
			MenuAction::NextMatch => self.navigate(NavDirection::Next),
			MenuAction::CommentAll => self.bulk_edit(Rewrite::Comment, None).await,
			MenuAction::UncommentAll => self.bulk_edit(Rewrite::Uncomment, None).await,
			MenuAction::DeleteAll => self.bulk_edit(Rewrite::Delete, None).await,
			MenuAction::OpenSettings => self.host.open_settings(),
		}
	}

	fn toggle_keep_highlights(&mut self) {
		let flipped = !self.config.keep_highlights;
		if let Err(e) = self.host.update_global("keepHighlights", flipped.into()) {
			tracing::warn!(error = %e, "keepHighlights update rejected");
			return;
		}
		// Hosts that echo settings writes as ConfigChanged make this
		// re-resolve a no-op.
		self.config = Config::resolve(&self.host.snapshot());
	}

	/// Moves the cursor to a match of the last report and reveals it.
	fn navigate(&mut self, direction: NavDirection) {
		let Some(active) = self.host.active_document() else {
			return;
		};
		let target = match &self.report {
			Some((doc, report)) if *doc == active.id => {
				target_index(report, self.host.cursor(), direction)
					.map(|index| report.locations()[index].span.clone())
			}
			_ => None,
		};
		let Some(span) = target else { return };
		self.host.set_cursor(active.id, span.start);
		self.host.reveal(active.id, span);
	}

	/// Plans and applies one bulk rewrite as a single host transaction.
	async fn bulk_edit(&mut self, rewrite: Rewrite, scope: Option<Range<CharIdx>>) {
		let Some(doc) = self.host.active_document() else {
			return;
		};
		let batch = match self.plan(&doc, rewrite, scope) {
			Ok(batch) => batch,
			Err(e) => {
				tracing::warn!(doc = ?doc.id, error = %e, "bulk rewrite planning failed");
				return;
			}
		};
		if batch.is_empty() {
			return;
		}
		if let Err(e) = self.host.apply_edits(doc.id, batch).await {
			// The rewrite did not apply; the next scan reflects whatever
			// the document actually holds.
			tracing::warn!(doc = ?doc.id, error = %e, "edit transaction failed");
		}
	}

	fn plan(
		&self,
		doc: &DocumentSnapshot,
		rewrite: Rewrite,
		scope: Option<Range<CharIdx>>,
	) -> Result<EditBatch, ActionError> {
		let text = doc.text.slice(..);
		match rewrite {
			Rewrite::Comment => comment_all(text, &self.config, scope),
			Rewrite::Uncomment => uncomment_all(text, &self.config, scope),
			Rewrite::Delete => delete_all(text, &self.config, scope),
		}
	}

	/// Comments out tracked calls in a document that is about to save.
	async fn cleanup_on_save(&mut self, doc: DocumentId) {
		if !self.config.auto_cleanup_on_save {
			return;
		}
		// The saving document need not be the focused one.
		let Some(snapshot) = self.host.document(doc) else {
			return;
		};
		let batch = match comment_all(snapshot.text.slice(..), &self.config, None) {
			Ok(batch) => batch,
			Err(e) => {
				tracing::warn!(?doc, error = %e, "save cleanup planning failed");
				return;
			}
		};
		if batch.is_empty() {
			return;
		}
		if let Err(e) = self.host.apply_edits(doc, batch).await {
			tracing::warn!(?doc, error = %e, "save cleanup failed");
		}
	}

	/// Scans the active document and republishes the status indicator and
	/// decorations.
	fn rescan_active(&mut self, paint: Paint) {
		let Some(doc) = self.host.active_document() else {
			self.host.set_status(None);
			return;
		};
		if !is_supported_language(&doc.language) {
			self.report = None;
			self.host.set_status(None);
			self.host.clear_decorations(doc.id);
			return;
		}

		let report = match scan(doc.text.slice(..), &self.config) {
			Ok(report) => report,
			Err(e) => {
				tracing::warn!(doc = ?doc.id, error = %e, "scan failed");
				return;
			}
		};
		self.scanned = Some((doc.id, doc.version));

		let status = self.status_for(&report);
		self.host.set_status(status);

		if paint == Paint::Force || self.config.keep_highlights {
			let groups = self.decoration_groups(&report);
			self.host.set_decorations(doc.id, groups);
		} else {
			self.host.clear_decorations(doc.id);
		}
		self.report = Some((doc.id, report));
	}

	fn status_for(&self, report: &ScanReport) -> Option<StatusUpdate> {
		let count = report.count();
		if count == 0 {
			return None;
		}
		let text = if self.capabilities.quick_pick_icons {
			format!("$(list-unordered) {count} logs found")
		} else {
			format!("{count} logs found")
		};
		let tooltip = self.capabilities.status_tooltip.then(|| {
			let active = report.active_count();
			format!("{active} active, {} commented", count - active)
		});
		Some(StatusUpdate { text, tooltip })
	}

	/// Groups match spans per method color, in configured method order.
	fn decoration_groups(&self, report: &ScanReport) -> Vec<DecorationGroup> {
		let mut groups = Vec::new();
		for &method in &self.config.methods {
			let spans: Vec<Range<CharIdx>> = report
				.locations()
				.iter()
				.filter(|loc| loc.method == method)
				.map(|loc| loc.span.clone())
				.collect();
			if spans.is_empty() {
				continue;
			}
			groups.push(DecorationGroup {
				style: DecorationStyle {
					color: self.config.color_for(method).to_string(),
					overview_ruler: self.capabilities.overview_ruler,
				},
				spans,
			});
		}
		groups
	}
}

/// Sleeps until `deadline`, or forever when there is none.
async fn wait_until(deadline: Option<Instant>) {
	match deadline {
		Some(due) => tokio::time::sleep_until(due).await,
		None => std::future::pending().await,
	}
}
