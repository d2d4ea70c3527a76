//! Session layer between the scan engine and a host editor.
//!
//! A [`Session`] owns all per-connection state (config snapshot, last scan
//! report, pending rescan) and reacts to [`HostEvent`]s on one logical
//! thread. Hosts plug in through the narrow seams in [`host`]; integration
//! tests drive a whole session against an in-memory mock.

/// Host feature detection from a version string.
pub mod capabilities;
/// Line-scoped quick fixes.
pub mod code_action;
/// The command surface hosts bind to keybindings and menus.
pub mod commands;
/// Debounced rescan scheduling.
pub mod debounce;
/// Host trait seams and surface value types.
pub mod host;
/// The quick-pick action menu.
pub mod menu;
/// Event dispatch and the session state machine.
pub mod session;

pub use capabilities::Capabilities;
pub use code_action::{CodeAction, actions_for_line};
pub use commands::Command;
pub use debounce::{RescanDebouncer, RescanPoll};
pub use host::{
	DecorationGroup, DecorationStyle, DocumentAccess, DocumentId, DocumentSnapshot, EditorSurface,
	HostError, SettingsStore, StatusUpdate,
};
pub use menu::{MenuAction, MenuItem};
pub use session::{HostEvent, Session};
