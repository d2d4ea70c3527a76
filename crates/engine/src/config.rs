use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Console methods in the tracking vocabulary.
///
/// The vocabulary is closed: settings entries outside it are discarded
/// during resolution rather than tracked blindly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogMethod {
	Log,
	Warn,
	Error,
	Info,
	Debug,
	Table,
	Trace,
	Dir,
	Group,
}

impl LogMethod {
	/// Every method in the vocabulary.
	pub const ALL: [LogMethod; 9] = [
		LogMethod::Log,
		LogMethod::Warn,
		LogMethod::Error,
		LogMethod::Info,
		LogMethod::Debug,
		LogMethod::Table,
		LogMethod::Trace,
		LogMethod::Dir,
		LogMethod::Group,
	];

	/// The method name as it appears in source text.
	pub fn as_str(self) -> &'static str {
		match self {
			LogMethod::Log => "log",
			LogMethod::Warn => "warn",
			LogMethod::Error => "error",
			LogMethod::Info => "info",
			LogMethod::Debug => "debug",
			LogMethod::Table => "table",
			LogMethod::Trace => "trace",
			LogMethod::Dir => "dir",
			LogMethod::Group => "group",
		}
	}

	/// Parses a method name; names outside the vocabulary are rejected.
	pub fn parse(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|m| m.as_str() == name)
	}
}

impl fmt::Display for LogMethod {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A raw host settings snapshot, JSON-shaped.
pub type RawSettings = serde_json::Map<String, Value>;

/// Resolved annotation configuration.
///
/// Produced only by [`Config::resolve`]: every field is validated
/// individually and falls back to its default, so a config is never
/// partially invalid and `methods` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
	/// Global kill switch. When false, scans return empty reports.
	pub enabled: bool,
	/// Methods to track, deduplicated in listed order.
	pub methods: Vec<LogMethod>,
	/// Fallback decoration color.
	pub highlight_color: String,
	/// Per-method decoration color overrides.
	pub colors: HashMap<LogMethod, String>,
	/// Inactivity window before a rescan after document changes.
	pub debounce: Duration,
	/// Comment out tracked calls when a document is about to save.
	pub auto_cleanup_on_save: bool,
	/// Keep decorations painted after every rescan.
	pub keep_highlights: bool,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			enabled: true,
			methods: vec![LogMethod::Log, LogMethod::Warn, LogMethod::Error, LogMethod::Info],
			highlight_color: "#FFB471".to_string(),
			colors: HashMap::from([
				(LogMethod::Log, "#FFB471".to_string()),
				(LogMethod::Warn, "#FFD700".to_string()),
				(LogMethod::Error, "#FF4D4D".to_string()),
				(LogMethod::Info, "#4DA6FF".to_string()),
			]),
			debounce: Duration::from_millis(1000),
			auto_cleanup_on_save: false,
			keep_highlights: false,
		}
	}
}

impl Config {
	/// Resolves a raw settings snapshot into a validated config.
	///
	/// Resolution never fails: missing fields take their defaults silently,
	/// while present-but-invalid values are dropped with a warning. Method
	/// entries outside the vocabulary are discarded; an empty method list
	/// falls back to the default set.
	pub fn resolve(raw: &RawSettings) -> Self {
		let defaults = Self::default();
		Self {
			enabled: bool_field(raw, "enabled", defaults.enabled),
			methods: methods_field(raw, &defaults.methods),
			highlight_color: color_field(raw, "highlightColor", &defaults.highlight_color),
			colors: colors_field(raw, &defaults.colors),
			debounce: debounce_field(raw, defaults.debounce),
			auto_cleanup_on_save: bool_field(raw, "autoCleanupOnSave", defaults.auto_cleanup_on_save),
			keep_highlights: bool_field(raw, "keepHighlights", defaults.keep_highlights),
		}
	}

	/// Returns the decoration color for a method, falling back to the
	/// global highlight color.
	pub fn color_for(&self, method: LogMethod) -> &str {
		self.colors.get(&method).map_or(&self.highlight_color, String::as_str)
	}
}

fn bool_field(raw: &RawSettings, key: &str, default: bool) -> bool {
	match raw.get(key) {
		Some(Value::Bool(b)) => *b,
		Some(other) => {
			tracing::warn!(key, value = %other, "ignoring non-boolean setting");
			default
		}
		None => default,
	}
}

fn methods_field(raw: &RawSettings, default: &[LogMethod]) -> Vec<LogMethod> {
	let mut methods = Vec::new();
	match raw.get("methods") {
		Some(Value::Array(entries)) => {
			for entry in entries {
				match entry.as_str().and_then(LogMethod::parse) {
					Some(m) if !methods.contains(&m) => methods.push(m),
					Some(_) => {}
					None => tracing::warn!(entry = %entry, "ignoring unknown tracked method"),
				}
			}
		}
		Some(other) => tracing::warn!(value = %other, "ignoring non-array methods setting"),
		None => {}
	}
	if methods.is_empty() {
		default.to_vec()
	} else {
		methods
	}
}

fn color_field(raw: &RawSettings, key: &str, default: &str) -> String {
	match raw.get(key) {
		Some(Value::String(s)) if !s.is_empty() => s.clone(),
		Some(other) => {
			tracing::warn!(key, value = %other, "ignoring invalid color setting");
			default.to_string()
		}
		None => default.to_string(),
	}
}

fn colors_field(raw: &RawSettings, default: &HashMap<LogMethod, String>) -> HashMap<LogMethod, String> {
	match raw.get("colors") {
		Some(Value::Object(map)) => {
			let mut colors = HashMap::new();
			for (key, value) in map {
				let Some(method) = LogMethod::parse(key) else {
					tracing::warn!(key, "ignoring color for unknown method");
					continue;
				};
				match value.as_str() {
					Some(color) if !color.is_empty() => {
						colors.insert(method, color.to_string());
					}
					_ => tracing::warn!(key, value = %value, "ignoring invalid method color"),
				}
			}
			colors
		}
		Some(other) => {
			tracing::warn!(value = %other, "ignoring non-object colors setting");
			default.clone()
		}
		None => default.clone(),
	}
}

fn debounce_field(raw: &RawSettings, default: Duration) -> Duration {
	// `debounceTimeout` is the key older releases shipped; `debounceMs`
	// wins when both are present.
	let value = raw.get("debounceMs").or_else(|| raw.get("debounceTimeout"));
	match value {
		Some(value) => match value.as_u64() {
			Some(ms) => Duration::from_millis(ms),
			None => {
				tracing::warn!(value = %value, "ignoring invalid debounce setting");
				default
			}
		},
		None => default,
	}
}
