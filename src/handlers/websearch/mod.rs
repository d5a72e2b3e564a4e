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

//! Web search handler surface and the provider registry.
//!
//! A web search handler turns a keyword query into a formatted text block
//! plus an ordered list of source URLs, and optionally scrapes links or
//! summarizes videos through the same provider. Handlers are instantiated
//! through [`create_handler`] with the host's settings store and error
//! reporter injected.

pub mod nanogpt;

pub use nanogpt::NanoGptWebSearchHandler;

use crate::error::ErrorReporter;
use crate::settings::{SettingField, SettingsStore};
use async_trait::async_trait;
use std::sync::Arc;

/// Aggregated result of one web search call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
	/// Newline-joined "title: snippet" lines, formatted for the LLM
	pub text: String,
	/// Source URLs in API response order
	pub sources: Vec<String>,
}

impl SearchResults {
	pub fn empty() -> Self {
		Self::default()
	}

	pub fn is_empty(&self) -> bool {
		self.text.is_empty() && self.sources.is_empty()
	}
}

/// Callback invoked once per discovered source during a streaming query,
/// with (title, url, icon)
pub type WebsiteSink<'a> = &'a mut (dyn FnMut(&str, &str, Option<&str>) + Send);

/// Capability surface implemented by one provider adapter.
///
/// Operations never return `Err`: each failure path reports one diagnostic
/// through the injected [`ErrorReporter`] and yields the empty sentinel.
#[async_trait]
pub trait WebSearchHandler: Send + Sync {
	/// Registry identifier for this provider
	fn key(&self) -> &'static str;

	/// Ordered configuration field descriptors for the host settings UI
	fn get_extra_settings(&self) -> Vec<SettingField>;

	fn supports_streaming_query(&self) -> bool {
		false
	}

	/// Perform a web search, returning formatted text and source URLs
	async fn query(&self, keywords: &str) -> SearchResults;

	/// Perform a web search, pushing each discovered source to `add_website`
	/// while the aggregated result is still returned in full.
	///
	/// The default implementation ignores the sink and falls back to
	/// [`Self::query`]; providers that support incremental source display
	/// override this and report `true` from `supports_streaming_query`.
	async fn query_streaming(
		&self,
		keywords: &str,
		_add_website: WebsiteSink<'_>,
	) -> SearchResults {
		self.query(keywords).await
	}

	/// Fetch scraped page content for a URL, or an empty string when the
	/// provider does not support scraping or the call fails
	async fn scrape_link(&self, _url: &str) -> String {
		String::new()
	}

	/// Summarize a video URL, or an empty string when unsupported
	async fn summarize_youtube(&self, _url: &str) -> String {
		String::new()
	}
}

/// Keys of all registered web search providers, in display order
pub fn handler_keys() -> &'static [&'static str] {
	&[nanogpt::HANDLER_KEY]
}

/// Instantiate a handler by registry key, wiring in the host collaborators
pub fn create_handler(
	key: &str,
	settings: Arc<dyn SettingsStore>,
	reporter: Arc<dyn ErrorReporter>,
) -> Option<Box<dyn WebSearchHandler>> {
	match key {
		nanogpt::HANDLER_KEY => Some(Box::new(NanoGptWebSearchHandler::new(settings, reporter))),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::LogReporter;
	use crate::settings::MemorySettings;

	#[test]
	fn test_registry_known_key() {
		let handler = create_handler(
			"nanogpt",
			Arc::new(MemorySettings::new()),
			Arc::new(LogReporter),
		)
		.expect("nanogpt handler should be registered");

		assert_eq!(handler.key(), "nanogpt");
		assert!(handler.supports_streaming_query());
	}

	#[test]
	fn test_registry_unknown_key() {
		assert!(create_handler(
			"no-such-provider",
			Arc::new(MemorySettings::new()),
			Arc::new(LogReporter),
		)
		.is_none());
	}

	#[test]
	fn test_registry_lists_all_keys() {
		for key in handler_keys() {
			assert!(create_handler(
				key,
				Arc::new(MemorySettings::new()),
				Arc::new(LogReporter),
			)
			.is_some());
		}
	}

	#[test]
	fn test_search_results_empty() {
		assert!(SearchResults::empty().is_empty());
		let results = SearchResults {
			text: "A: B".to_string(),
			sources: vec!["http://x".to_string()],
		};
		assert!(!results.is_empty());
	}
}
