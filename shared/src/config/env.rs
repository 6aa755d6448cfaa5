//! Environment variable lookup helpers
//!
//! Every `from_env()` constructor goes through an [`EnvSource`] so the parsing
//! rules can be exercised without touching the process environment.

use std::str::FromStr;
use tracing::warn;

/// Lookup function from variable name to value
pub type EnvSource<'a> = dyn Fn(&str) -> Option<String> + 'a;

/// Reads from the process environment, treating empty values as unset
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse a variable, falling back to `default` when unset or unparsable
///
/// An unparsable value is logged so a mistyped setting shows up at startup.
pub fn parse_or<T: FromStr>(source: &EnvSource<'_>, key: &str, default: T) -> T {
    let Some(raw) = source(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(key, value = %raw, "Unparsable environment value, using default");
            default
        }
    }
}

/// Read a variable as a string, falling back to `default`
pub fn string_or(source: &EnvSource<'_>, key: &str, default: &str) -> String {
    source(key).unwrap_or_else(|| default.to_string())
}

/// Read a comma-separated list, trimming entries and dropping empty ones
pub fn list_or(source: &EnvSource<'_>, key: &str, default: &[&str]) -> Vec<String> {
    match source(key) {
        Some(value) => value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect(),
        None => default.iter().map(|item| item.to_string()).collect(),
    }
}
