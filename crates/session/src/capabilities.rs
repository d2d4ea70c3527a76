//! Host feature detection from a version string.
//!
//! Resolved once at session start and threaded to the surfaces that need
//! it; the engine never consults capabilities.

/// UI features the connected host supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
	/// Icon glyphs in quick-pick labels and the status indicator.
	pub quick_pick_icons: bool,
	/// Overview ruler marks next to the scrollbar.
	pub overview_ruler: bool,
	/// Hover tooltip on the status indicator.
	pub status_tooltip: bool,
	/// Code-action (quick fix) provider surface.
	pub code_actions: bool,
}

impl Capabilities {
	/// Detects capabilities from a `major.minor.patch` host version.
	///
	/// The parse is lenient: missing or malformed components count as zero,
	/// which turns the corresponding features off rather than failing.
	pub fn from_version(version: &str) -> Self {
		let (major, minor) = parse_version(version);
		Self {
			quick_pick_icons: (major, minor) >= (1, 44),
			overview_ruler: true,
			status_tooltip: (major, minor) >= (1, 30),
			code_actions: (major, minor) >= (1, 40),
		}
	}

	/// Everything on. For hosts new enough that gating is moot.
	pub fn modern() -> Self {
		Self {
			quick_pick_icons: true,
			overview_ruler: true,
			status_tooltip: true,
			code_actions: true,
		}
	}
}

fn parse_version(version: &str) -> (u32, u32) {
	let mut parts = version.split('.');
	let major = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
	let minor = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
	(major, minor)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_quick_pick_icons_threshold() {
		assert!(!Capabilities::from_version("1.43.2").quick_pick_icons);
		assert!(Capabilities::from_version("1.44.0").quick_pick_icons);
	}

	#[test]
	fn test_status_tooltip_threshold() {
		assert!(!Capabilities::from_version("1.29.9").status_tooltip);
		assert!(Capabilities::from_version("1.30.0").status_tooltip);
	}

	#[test]
	fn test_code_actions_threshold() {
		assert!(!Capabilities::from_version("1.39.0").code_actions);
		assert!(Capabilities::from_version("1.40.1").code_actions);
	}

	#[test]
	fn test_major_bump_enables_everything() {
		let caps = Capabilities::from_version("2.0.0");
		assert_eq!(caps, Capabilities::modern());
	}

	#[test]
	fn test_overview_ruler_always_on() {
		assert!(Capabilities::from_version("0.9.0").overview_ruler);
	}

	#[test]
	fn test_malformed_version_degrades() {
		let caps = Capabilities::from_version("nightly");
		assert!(!caps.quick_pick_icons);
		assert!(!caps.status_tooltip);
		assert!(!caps.code_actions);
		assert!(caps.overview_ruler);
	}

	#[test]
	fn test_missing_minor_counts_as_zero() {
		assert!(!Capabilities::from_version("1").status_tooltip);
	}
}
