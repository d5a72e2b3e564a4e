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

// Crate logging macros, controlled by the WEBSEARCH_LOG environment variable

use colored::Colorize;
use lazy_static::lazy_static;

/// Log verbosity, ordered from silent to most verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
	Off,
	Error,
	Warn,
	Info,
	Debug,
}

lazy_static! {
	static ref ACTIVE_LEVEL: LogLevel = parse_level(
		std::env::var("WEBSEARCH_LOG")
			.unwrap_or_default()
			.as_str()
	);
}

/// Map an environment variable value to a log level (default: Warn)
pub fn parse_level(value: &str) -> LogLevel {
	match value.to_lowercase().as_str() {
		"debug" => LogLevel::Debug,
		"info" => LogLevel::Info,
		"warn" | "warning" => LogLevel::Warn,
		"error" => LogLevel::Error,
		"off" | "none" => LogLevel::Off,
		_ => LogLevel::Warn,
	}
}

/// Check whether messages at the given level are emitted
pub fn enabled(level: LogLevel) -> bool {
	level <= *ACTIVE_LEVEL
}

/// Write one log line to stderr with a timestamp and colored level tag
pub fn emit(level: LogLevel, message: &str) {
	if !enabled(level) {
		return;
	}

	let tag = match level {
		LogLevel::Debug => "DEBUG".dimmed(),
		LogLevel::Info => "INFO".cyan(),
		LogLevel::Warn => "WARN".yellow(),
		LogLevel::Error => "ERROR".red().bold(),
		LogLevel::Off => return,
	};

	let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
	eprintln!("{} {} {}", timestamp.to_string().dimmed(), tag, message);
}

#[macro_export]
macro_rules! log_debug {
	($($arg:tt)*) => {
		$crate::log::emit($crate::log::LogLevel::Debug, &format!($($arg)*))
	};
}

#[macro_export]
macro_rules! log_info {
	($($arg:tt)*) => {
		$crate::log::emit($crate::log::LogLevel::Info, &format!($($arg)*))
	};
}

#[macro_export]
macro_rules! log_warn {
	($($arg:tt)*) => {
		$crate::log::emit($crate::log::LogLevel::Warn, &format!($($arg)*))
	};
}

#[macro_export]
macro_rules! log_error {
	($($arg:tt)*) => {
		$crate::log::emit($crate::log::LogLevel::Error, &format!($($arg)*))
	};
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_level() {
		assert_eq!(parse_level("debug"), LogLevel::Debug);
		assert_eq!(parse_level("INFO"), LogLevel::Info);
		assert_eq!(parse_level("warning"), LogLevel::Warn);
		assert_eq!(parse_level("off"), LogLevel::Off);
		// Unknown values fall back to Warn
		assert_eq!(parse_level(""), LogLevel::Warn);
		assert_eq!(parse_level("verbose"), LogLevel::Warn);
	}

	#[test]
	fn test_level_ordering() {
		assert!(LogLevel::Error < LogLevel::Debug);
		assert!(LogLevel::Off < LogLevel::Error);
		assert!(LogLevel::Warn < LogLevel::Info);
	}
}
