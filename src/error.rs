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

// Diagnostic severity and the error-reporting collaborator interface

use serde::{Deserialize, Serialize};

/// Severity of a reported handler failure, consumed by the host UI or logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
	Info,
	Warning,
	Error,
}

impl std::fmt::Display for ErrorSeverity {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ErrorSeverity::Info => write!(f, "info"),
			ErrorSeverity::Warning => write!(f, "warning"),
			ErrorSeverity::Error => write!(f, "error"),
		}
	}
}

/// Sink for handler diagnostics.
///
/// Handlers report exactly one diagnostic per failure path and then return
/// their empty sentinel value; no failure ever propagates as an `Err` to the
/// host. The host typically forwards these to its notification UI.
pub trait ErrorReporter: Send + Sync {
	fn throw(&self, message: &str, severity: ErrorSeverity);
}

/// Reporter that routes diagnostics to the crate log macros
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
	fn throw(&self, message: &str, severity: ErrorSeverity) {
		match severity {
			ErrorSeverity::Info => crate::log_info!("{}", message),
			ErrorSeverity::Warning => crate::log_warn!("{}", message),
			ErrorSeverity::Error => crate::log_error!("{}", message),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_severity_display() {
		assert_eq!(ErrorSeverity::Warning.to_string(), "warning");
		assert_eq!(ErrorSeverity::Error.to_string(), "error");
	}

	#[test]
	fn test_severity_serialization() {
		assert_eq!(
			serde_json::to_string(&ErrorSeverity::Warning).unwrap(),
			"\"warning\""
		);
		let parsed: ErrorSeverity = serde_json::from_str("\"error\"").unwrap();
		assert_eq!(parsed, ErrorSeverity::Error);
	}
}
