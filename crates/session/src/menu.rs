//! The quick-pick action menu.
//!
//! The session builds the item list; the host renders it and reports the
//! chosen action back. Icon glyphs are only emitted for hosts that can
//! render them.

use glint_engine::Config;

use crate::capabilities::Capabilities;

/// What a chosen menu item does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
	/// Flip the `keepHighlights` setting at global scope.
	ToggleKeepHighlights,
	/// Jump to the first match, then highlight all of them.
	LocateFirst,
	/// Jump to the next match after the cursor.
	NextMatch,
	CommentAll,
	UncommentAll,
	DeleteAll,
	/// Open the host settings UI at this tool's section.
	OpenSettings,
}

/// One renderable quick-pick entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
	pub label: String,
	pub detail: String,
	pub action: MenuAction,
}

/// Builds the action menu for the current config and host capabilities.
///
/// The first entry reflects the `keep_highlights` state so the toggle
/// reads as the action it will perform, not the current value.
pub fn build(config: &Config, capabilities: &Capabilities) -> Vec<MenuItem> {
	let icons = capabilities.quick_pick_icons;
	let (toggle_icon, toggle_label, toggle_detail) = if config.keep_highlights {
		("eye-closed", "Clear Highlights", "Disable permanent highlighting")
	} else {
		("eye", "Keep Highlights", "Enable permanent highlighting")
	};

	vec![
		item(toggle_icon, toggle_label, toggle_detail, MenuAction::ToggleKeepHighlights, icons),
		item(
			"search",
			"Locate All",
			"Jump to the first log found",
			MenuAction::LocateFirst,
			icons,
		),
		item(
			"arrow-down",
			"Next Log",
			"Jump to the next occurrence",
			MenuAction::NextMatch,
			icons,
		),
		item("comment", "Comment All", "Prefix all logs with //", MenuAction::CommentAll, icons),
		item(
			"comment-discussion",
			"Uncomment All",
			"Restore all commented logs",
			MenuAction::UncommentAll,
			icons,
		),
		item("trash", "Delete All", "Remove all logs from file", MenuAction::DeleteAll, icons),
		item(
			"settings-gear",
			"Settings",
			"Open tracker settings",
			MenuAction::OpenSettings,
			icons,
		),
	]
}

fn item(icon: &str, label: &str, detail: &str, action: MenuAction, icons: bool) -> MenuItem {
	let label = if icons {
		format!("$({icon}) {label}")
	} else {
		label.to_string()
	};
	MenuItem {
		label,
		detail: detail.to_string(),
		action,
	}
}

#[cfg(test)]
mod tests {
	use glint_engine::RawSettings;

	use super::*;

	fn config_with_keep_highlights(keep: bool) -> Config {
		let mut raw = RawSettings::new();
		raw.insert("keepHighlights".into(), serde_json::Value::Bool(keep));
		Config::resolve(&raw)
	}

	#[test]
	fn test_menu_has_all_seven_actions() {
		let items = build(&Config::default(), &Capabilities::modern());
		let actions: Vec<MenuAction> = items.iter().map(|i| i.action).collect();
		assert_eq!(actions, vec![
			MenuAction::ToggleKeepHighlights,
			MenuAction::LocateFirst,
			MenuAction::NextMatch,
			MenuAction::CommentAll,
			MenuAction::UncommentAll,
			MenuAction::DeleteAll,
			MenuAction::OpenSettings,
		]);
	}

	#[test]
	fn test_icons_emitted_for_capable_hosts() {
		let items = build(&Config::default(), &Capabilities::modern());
		assert_eq!(items[1].label, "$(search) Locate All");
		assert_eq!(items[5].label, "$(trash) Delete All");
	}

	#[test]
	fn test_icons_stripped_for_older_hosts() {
		let caps = Capabilities::from_version("1.40.0");
		let items = build(&Config::default(), &caps);
		assert!(items.iter().all(|i| !i.label.contains("$(")), "{items:?}");
		assert_eq!(items[1].label, "Locate All");
	}

	#[test]
	fn test_toggle_reads_as_the_action_it_performs() {
		let off = build(&config_with_keep_highlights(false), &Capabilities::modern());
		assert_eq!(off[0].label, "$(eye) Keep Highlights");
		assert_eq!(off[0].detail, "Enable permanent highlighting");

		let on = build(&config_with_keep_highlights(true), &Capabilities::modern());
		assert_eq!(on[0].label, "$(eye-closed) Clear Highlights");
		assert_eq!(on[0].detail, "Disable permanent highlighting");
	}
}
