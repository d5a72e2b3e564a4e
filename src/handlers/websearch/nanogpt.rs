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

// NanoGPT provider implementation: web search, link scraping, YouTube summaries

use super::{SearchResults, WebSearchHandler, WebsiteSink};
use crate::error::{ErrorReporter, ErrorSeverity};
use crate::settings::{SettingField, SettingsStore};
use anyhow::{anyhow, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

pub const HANDLER_KEY: &str = "nanogpt";

// Default endpoints, each independently overridable through settings
const DEFAULT_SEARCH_ENDPOINT: &str = "https://nano-gpt.com/api/web";
const DEFAULT_SCRAPE_ENDPOINT: &str = "https://nano-gpt.com/api/v1/scrape";
const DEFAULT_SUMMARIZE_ENDPOINT: &str = "https://nano-gpt.com/api/v1/summarize-youtube";

const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);
const SCRAPE_TIMEOUT: Duration = Duration::from_secs(60);
const SUMMARIZE_TIMEOUT: Duration = Duration::from_secs(120);

// Search retry budget: total attempts, with 2^attempt seconds between them
const SEARCH_ATTEMPTS: u32 = 3;
const BACKOFF_FACTOR: u64 = 2;

/// Web search handler for the NanoGPT API
pub struct NanoGptWebSearchHandler {
	settings: Arc<dyn SettingsStore>,
	reporter: Arc<dyn ErrorReporter>,
}

impl NanoGptWebSearchHandler {
	pub fn new(settings: Arc<dyn SettingsStore>, reporter: Arc<dyn ErrorReporter>) -> Self {
		Self { settings, reporter }
	}

	/// Read the API key setting, reporting a warning when it is not configured
	fn require_api_key(&self) -> Option<String> {
		let api_key = self.settings.get_str("api", "");
		if api_key.is_empty() {
			self.reporter.throw(
				"NanoGPT API key is not configured",
				ErrorSeverity::Warning,
			);
			return None;
		}
		Some(api_key)
	}

	/// One search request cycle shared by the plain and streaming queries.
	///
	/// Retries transient HTTP errors up to the attempt budget with doubling
	/// delays. A 404 means the endpoint itself is wrong, so it is reported at
	/// Error severity and never retried; transport and parse failures abort
	/// immediately at Warning severity.
	async fn run_search(
		&self,
		keywords: &str,
		mut sink: Option<WebsiteSink<'_>>,
	) -> SearchResults {
		let api_key = match self.require_api_key() {
			Some(key) => key,
			None => return SearchResults::empty(),
		};
		let endpoint = self.settings.get_str("endpoint", DEFAULT_SEARCH_ENDPOINT);
		let search_type = self.settings.get_str("search_type", "standard");

		let payload = json!({
			"query": keywords,
			"type": search_type,
		});

		let client = reqwest::Client::new();

		for attempt in 0..SEARCH_ATTEMPTS {
			crate::log_debug!(
				"NanoGPT web search request to {} (attempt {}/{})",
				endpoint,
				attempt + 1,
				SEARCH_ATTEMPTS
			);

			let response = match client
				.post(&endpoint)
				.header("x-api-key", &api_key)
				.json(&payload)
				.timeout(SEARCH_TIMEOUT)
				.send()
				.await
			{
				Ok(response) => response,
				Err(e) => {
					self.reporter.throw(
						&format!("Error performing NanoGPT web search: {}", e),
						ErrorSeverity::Warning,
					);
					return SearchResults::empty();
				}
			};

			let status = response.status();
			crate::log_debug!("NanoGPT web search response status: {}", status);

			if status == StatusCode::NOT_FOUND {
				self.reporter.throw(
					&format!("Endpoint not found: {}", endpoint),
					ErrorSeverity::Error,
				);
				return SearchResults::empty();
			}

			if !status.is_success() {
				if attempt + 1 < SEARCH_ATTEMPTS {
					let delay = BACKOFF_FACTOR.pow(attempt);
					crate::log_warn!(
						"NanoGPT web search failed with status {}. Retrying in {}s...",
						status,
						delay
					);
					tokio::time::sleep(Duration::from_secs(delay)).await;
					continue;
				}
				self.reporter.throw(
					&format!("Error performing NanoGPT web search: HTTP status {}", status),
					ErrorSeverity::Warning,
				);
				return SearchResults::empty();
			}

			let result: Value = match response.json().await {
				Ok(result) => result,
				Err(e) => {
					self.reporter.throw(
						&format!("Error performing NanoGPT web search: {}", e),
						ErrorSeverity::Warning,
					);
					return SearchResults::empty();
				}
			};

			return collect_results(&result, sink.take());
		}

		SearchResults::empty()
	}

	/// POST `{"url": ...}` to one of the bearer-authenticated endpoints and
	/// extract a single string field from the response. Used by link scraping
	/// and YouTube summarization; no retries on these paths. The caller maps
	/// the error into one reported diagnostic.
	async fn fetch_url_field(
		&self,
		endpoint: &str,
		api_key: &str,
		url: &str,
		timeout: Duration,
		field: &str,
	) -> Result<String> {
		let payload = json!({ "url": url });
		let client = reqwest::Client::new();

		crate::log_debug!("NanoGPT {} request to {}", field, endpoint);

		let response = client
			.post(endpoint)
			.header("Authorization", format!("Bearer {}", api_key))
			.json(&payload)
			.timeout(timeout)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			return Err(anyhow!("HTTP status {}", status));
		}

		let result: Value = response.json().await?;

		Ok(result
			.get(field)
			.and_then(|v| v.as_str())
			.unwrap_or_default()
			.to_string())
	}
}

/// Walk the `results` array of a search response, collecting source URLs and
/// "title: snippet" lines, and pushing each source to the sink when present
fn collect_results(result: &Value, mut sink: Option<WebsiteSink<'_>>) -> SearchResults {
	let mut sources = Vec::new();
	let mut lines = Vec::new();

	if let Some(items) = result.get("results").and_then(|r| r.as_array()) {
		for item in items {
			if let Some(url) = item.get("url").and_then(|u| u.as_str()) {
				if let Some(add_website) = sink.as_mut() {
					let title = item
						.get("title")
						.and_then(|t| t.as_str())
						.unwrap_or("Unknown");
					add_website(title, url, None);
				}
				sources.push(url.to_string());
			}

			if let (Some(title), Some(snippet)) = (
				item.get("title").and_then(|t| t.as_str()),
				item.get("snippet").and_then(|s| s.as_str()),
			) {
				lines.push(format!("{}: {}", title, snippet));
			}
		}
	}

	SearchResults {
		text: lines.join("\n"),
		sources,
	}
}

#[async_trait::async_trait]
impl WebSearchHandler for NanoGptWebSearchHandler {
	fn key(&self) -> &'static str {
		HANDLER_KEY
	}

	fn supports_streaming_query(&self) -> bool {
		true
	}

	async fn query(&self, keywords: &str) -> SearchResults {
		self.run_search(keywords, None).await
	}

	async fn query_streaming(
		&self,
		keywords: &str,
		add_website: WebsiteSink<'_>,
	) -> SearchResults {
		self.run_search(keywords, Some(add_website)).await
	}

	async fn scrape_link(&self, url: &str) -> String {
		if !self.settings.get_bool("link_scraping", false) {
			self.reporter
				.throw("Link scraping is not enabled", ErrorSeverity::Warning);
			return String::new();
		}

		let api_key = match self.require_api_key() {
			Some(key) => key,
			None => return String::new(),
		};
		let endpoint = self
			.settings
			.get_str("scraping_endpoint", DEFAULT_SCRAPE_ENDPOINT);

		match self
			.fetch_url_field(&endpoint, &api_key, url, SCRAPE_TIMEOUT, "content")
			.await
		{
			Ok(content) => content,
			Err(e) => {
				self.reporter.throw(
					&format!("Error scraping link: {}", e),
					ErrorSeverity::Warning,
				);
				String::new()
			}
		}
	}

	async fn summarize_youtube(&self, url: &str) -> String {
		if !self.settings.get_bool("youtube_summarization", false) {
			self.reporter.throw(
				"YouTube summarization is not enabled",
				ErrorSeverity::Warning,
			);
			return String::new();
		}

		let api_key = match self.require_api_key() {
			Some(key) => key,
			None => return String::new(),
		};
		let endpoint = self.settings.get_str(
			"youtube_summarization_endpoint",
			DEFAULT_SUMMARIZE_ENDPOINT,
		);

		match self
			.fetch_url_field(&endpoint, &api_key, url, SUMMARIZE_TIMEOUT, "summary")
			.await
		{
			Ok(summary) => summary,
			Err(e) => {
				self.reporter.throw(
					&format!("Error summarizing YouTube video: {}", e),
					ErrorSeverity::Warning,
				);
				String::new()
			}
		}
	}

	fn get_extra_settings(&self) -> Vec<SettingField> {
		vec![
			SettingField::password("api", "API Key", "NanoGPT API key for web search", ""),
			SettingField::entry(
				"endpoint",
				"Web Search Endpoint",
				"NanoGPT API endpoint for web search",
				DEFAULT_SEARCH_ENDPOINT,
			),
			SettingField::combo(
				"search_type",
				"Search Type",
				"Type of web search to perform",
				"standard",
				&[("Standard Search", "standard"), ("Deep Search", "deep")],
			),
			SettingField::toggle(
				"link_scraping",
				"Enable Link Scraping",
				"Enable or disable link scraping",
				false,
			),
			SettingField::entry(
				"scraping_endpoint",
				"Scraping Endpoint",
				"API endpoint for link scraping",
				DEFAULT_SCRAPE_ENDPOINT,
			),
			SettingField::toggle(
				"youtube_summarization",
				"Enable YouTube Summarization",
				"Enable or disable YouTube summarization",
				false,
			),
			SettingField::entry(
				"youtube_summarization_endpoint",
				"YouTube Summarization Endpoint",
				"API endpoint for YouTube summarization",
				DEFAULT_SUMMARIZE_ENDPOINT,
			),
		]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_collect_results_full_entry() {
		let response = json!({
			"results": [
				{"title": "A", "snippet": "B", "url": "http://x"}
			]
		});

		let results = collect_results(&response, None);
		assert_eq!(results.text, "A: B");
		assert_eq!(results.sources, vec!["http://x"]);
	}

	#[test]
	fn test_collect_results_partial_entries() {
		// A url-only entry contributes a source but no text line; a
		// title+snippet entry without a url contributes only a line
		let response = json!({
			"results": [
				{"url": "http://only-url"},
				{"title": "T", "snippet": "S"},
				{"title": "no snippet here"}
			]
		});

		let results = collect_results(&response, None);
		assert_eq!(results.text, "T: S");
		assert_eq!(results.sources, vec!["http://only-url"]);
	}

	#[test]
	fn test_collect_results_missing_results_key() {
		let results = collect_results(&json!({"unexpected": true}), None);
		assert!(results.is_empty());
	}

	#[test]
	fn test_collect_results_sink_receives_sources() {
		let response = json!({
			"results": [
				{"title": "A", "snippet": "B", "url": "http://x"},
				{"snippet": "no title or url"},
				{"url": "http://untitled"}
			]
		});

		let mut seen: Vec<(String, String, Option<String>)> = Vec::new();
		let mut sink = |title: &str, url: &str, icon: Option<&str>| {
			seen.push((title.to_string(), url.to_string(), icon.map(String::from)));
		};

		let results = collect_results(&response, Some(&mut sink));

		assert_eq!(
			seen,
			vec![
				("A".to_string(), "http://x".to_string(), None),
				("Unknown".to_string(), "http://untitled".to_string(), None),
			]
		);
		assert_eq!(results.sources, vec!["http://x", "http://untitled"]);
		assert_eq!(results.text, "A: B");
	}

	#[test]
	fn test_extra_settings_order_and_defaults() {
		let settings = Arc::new(crate::settings::MemorySettings::new());
		let reporter = Arc::new(crate::error::LogReporter);
		let handler = NanoGptWebSearchHandler::new(settings, reporter);

		let fields = handler.get_extra_settings();
		let keys: Vec<&str> = fields.iter().map(|f| f.key.as_str()).collect();
		assert_eq!(
			keys,
			vec![
				"api",
				"endpoint",
				"search_type",
				"link_scraping",
				"scraping_endpoint",
				"youtube_summarization",
				"youtube_summarization_endpoint",
			]
		);

		assert_eq!(fields[1].default, json!(DEFAULT_SEARCH_ENDPOINT));
		assert_eq!(fields[2].default, json!("standard"));
		assert_eq!(fields[3].default, json!(false));
	}
}
