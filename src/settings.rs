// Copyright 2025 Muvon Un Limited
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Settings access and the declarative settings descriptors for the host UI

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Read-only configuration lookup, owned and persisted by the host.
///
/// Handlers read scalar values by key; absent keys fall back to the default
/// the caller supplies. The typed helpers also fall back when the stored
/// value has the wrong JSON type.
pub trait SettingsStore: Send + Sync {
	fn get_setting(&self, key: &str) -> Option<Value>;

	fn get_str(&self, key: &str, default: &str) -> String {
		match self.get_setting(key) {
			Some(Value::String(s)) => s,
			_ => default.to_string(),
		}
	}

	fn get_bool(&self, key: &str, default: bool) -> bool {
		match self.get_setting(key) {
			Some(Value::Bool(b)) => b,
			_ => default,
		}
	}
}

/// In-memory settings store, used by hosts without persistence and by tests
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
	values: HashMap<String, Value>,
}

impl MemorySettings {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set(&mut self, key: &str, value: impl Into<Value>) {
		self.values.insert(key.to_string(), value.into());
	}
}

impl SettingsStore for MemorySettings {
	fn get_setting(&self, key: &str) -> Option<Value> {
		self.values.get(key).cloned()
	}
}

// UI control variants for a settings field, using tagged enums
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SettingControl {
	Entry {
		#[serde(default)]
		password: bool,
	},
	Toggle,
	Combo {
		/// Allowed choices as (label, value) pairs
		values: Vec<(String, String)>,
	},
}

/// One configuration field descriptor consumed by the host's settings UI
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SettingField {
	pub key: String,
	pub title: String,
	pub description: String,
	#[serde(flatten)]
	pub control: SettingControl,
	pub default: Value,
}

impl SettingField {
	pub fn entry(key: &str, title: &str, description: &str, default: &str) -> Self {
		Self {
			key: key.to_string(),
			title: title.to_string(),
			description: description.to_string(),
			control: SettingControl::Entry { password: false },
			default: Value::String(default.to_string()),
		}
	}

	pub fn password(key: &str, title: &str, description: &str, default: &str) -> Self {
		Self {
			control: SettingControl::Entry { password: true },
			..Self::entry(key, title, description, default)
		}
	}

	pub fn toggle(key: &str, title: &str, description: &str, default: bool) -> Self {
		Self {
			key: key.to_string(),
			title: title.to_string(),
			description: description.to_string(),
			control: SettingControl::Toggle,
			default: Value::Bool(default),
		}
	}

	pub fn combo(
		key: &str,
		title: &str,
		description: &str,
		default: &str,
		values: &[(&str, &str)],
	) -> Self {
		Self {
			key: key.to_string(),
			title: title.to_string(),
			description: description.to_string(),
			control: SettingControl::Combo {
				values: values
					.iter()
					.map(|(label, value)| (label.to_string(), value.to_string()))
					.collect(),
			},
			default: Value::String(default.to_string()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_memory_settings_defaults() {
		let mut settings = MemorySettings::new();
		settings.set("endpoint", "https://example.com");
		settings.set("enabled", true);

		assert_eq!(
			settings.get_str("endpoint", "fallback"),
			"https://example.com"
		);
		assert_eq!(settings.get_str("missing", "fallback"), "fallback");
		assert!(settings.get_bool("enabled", false));
		assert!(!settings.get_bool("missing", false));
	}

	#[test]
	fn test_typed_helpers_fall_back_on_wrong_type() {
		let mut settings = MemorySettings::new();
		settings.set("count", 42);

		assert_eq!(settings.get_str("count", "default"), "default");
		assert!(settings.get_bool("count", true));
	}

	#[test]
	fn test_setting_field_serialization() {
		let field = SettingField::combo(
			"search_type",
			"Search Type",
			"Type of search",
			"standard",
			&[("Standard Search", "standard"), ("Deep Search", "deep")],
		);

		let serialized = serde_json::to_value(&field).unwrap();
		assert_eq!(serialized["key"], json!("search_type"));
		assert_eq!(serialized["type"], json!("combo"));
		assert_eq!(serialized["default"], json!("standard"));
		assert_eq!(serialized["values"][1], json!(["Deep Search", "deep"]));
	}

	#[test]
	fn test_password_entry_descriptor() {
		let field = SettingField::password("api", "API Key", "Provider API key", "");
		assert_eq!(
			field.control,
			SettingControl::Entry { password: true }
		);
		assert_eq!(field.default, Value::String(String::new()));
	}
}
