//! Rate-limit bucket key.

use std::fmt;

use super::caller::CallerIdentity;

/// Key of one (operation, caller) fixed-window counter
///
/// Format: `{prefix}:{operation}:{caller}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RateKey(String);

impl RateKey {
    pub fn new(prefix: &str, operation: &str, caller: &CallerIdentity) -> Self {
        Self(format!("{}:{}:{}", prefix, operation, caller))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RateKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
