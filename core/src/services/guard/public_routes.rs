//! Public operation allowlist

use std::collections::HashSet;

/// Operation identifiers that skip token verification
#[derive(Debug, Clone, Default)]
pub struct PublicRoutes {
    operations: HashSet<String>,
}

impl PublicRoutes {
    pub fn new<I, S>(operations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            operations: operations.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact match on the operation identifier
    pub fn is_public(&self, operation: &str) -> bool {
        self.operations.contains(operation)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
