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

//! Pluggable web search and content retrieval handlers.
//!
//! Each handler is an adapter around one external provider's HTTP API. The
//! host application supplies two collaborators at construction time: a
//! [`SettingsStore`] for configuration lookup and an [`ErrorReporter`] that
//! receives one diagnostic per failure path. Handler operations never fail
//! hard - every failure degrades to an empty result plus a reported
//! diagnostic, so the host process keeps running.

pub mod error;
pub mod handlers;
pub mod log;
pub mod settings;

pub use error::{ErrorReporter, ErrorSeverity, LogReporter};
pub use handlers::websearch::{
	create_handler, handler_keys, NanoGptWebSearchHandler, SearchResults, WebSearchHandler,
	WebsiteSink,
};
pub use settings::{MemorySettings, SettingControl, SettingField, SettingsStore};
