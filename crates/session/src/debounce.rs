//! Debounced rescan scheduling.
//!
//! Typing repeatedly reschedules one pending rescan; the deadline only
//! results in a scan when its document is still the active one. The state
//! machine takes the current instant as an argument, so tests drive it
//! without sleeping; the session's driver loop adapts it to the tokio
//! clock.

use std::time::Duration;

use tokio::time::Instant;

use crate::host::DocumentId;

/// One pending rescan. Rescheduling replaces it wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingRescan {
	doc: DocumentId,
	due: Instant,
}

/// Schedules at most one debounced rescan at a time.
#[derive(Debug, Default)]
pub struct RescanDebouncer {
	pending: Option<PendingRescan>,
}

/// Result of polling the debouncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RescanPoll {
	/// Nothing scheduled.
	Idle,
	/// A rescan is scheduled but not yet due.
	Waiting { due: Instant },
	/// The deadline passed and the document is still current.
	Due { doc: DocumentId },
}

impl RescanDebouncer {
	pub fn new() -> Self {
		Self::default()
	}

	/// Schedules a rescan of `doc` once `delay` passes without another edit.
	///
	/// Any previously pending rescan is replaced, even one for another
	/// document; only the newest edit matters.
	pub fn schedule(&mut self, doc: DocumentId, now: Instant, delay: Duration) {
		self.pending = Some(PendingRescan { doc, due: now + delay });
	}

	/// Drops the pending rescan, if any.
	pub fn cancel(&mut self) {
		self.pending = None;
	}

	/// The instant the pending rescan comes due.
	pub fn deadline(&self) -> Option<Instant> {
		self.pending.map(|p| p.due)
	}

	/// Checks the deadline against `now`.
	///
	/// A due rescan is consumed. When the due document is no longer the
	/// active one the deadline is stale and discarded without a scan.
	pub fn poll(&mut self, now: Instant, active: Option<DocumentId>) -> RescanPoll {
		let Some(p) = self.pending else {
			return RescanPoll::Idle;
		};
		if now < p.due {
			return RescanPoll::Waiting { due: p.due };
		}
		self.pending = None;
		if active == Some(p.doc) {
			RescanPoll::Due { doc: p.doc }
		} else {
			tracing::debug!(doc = ?p.doc, "stale rescan deadline discarded");
			RescanPoll::Idle
		}
	}
}
