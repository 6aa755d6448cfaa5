//! Caller identity used to bucket rate-limit counters.

use std::fmt;
use uuid::Uuid;

/// Who a rate-limit counter is charged to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CallerIdentity {
    /// Verified principal on a protected operation
    Principal(Uuid),
    /// Network address on a public operation
    Address(String),
}

/// Placeholder address when the transport reports no peer
pub const UNKNOWN_ADDRESS: &str = "unknown";

impl CallerIdentity {
    /// Address identity, falling back to [`UNKNOWN_ADDRESS`]
    pub fn from_peer(peer: Option<&str>) -> Self {
        let address = peer
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(UNKNOWN_ADDRESS);
        CallerIdentity::Address(address.to_string())
    }
}

impl fmt::Display for CallerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallerIdentity::Principal(id) => write!(f, "user:{}", id),
            CallerIdentity::Address(addr) => write!(f, "ip:{}", addr),
        }
    }
}
