//! Call metadata in, call context out

use uuid::Uuid;

use crate::domain::entities::principal::Principal;
use crate::domain::value_objects::CallerIdentity;

/// Transport-neutral view of an inbound call
#[derive(Debug, Clone, Copy)]
pub struct CallMetadata<'a> {
    /// Operation identifier: `"{METHOD} {pattern}"` for HTTP, the full method
    /// path for RPC
    pub operation: &'a str,
    /// Raw authorization value, e.g. `Bearer <token>`
    pub authorization: Option<&'a str>,
    /// Caller network address
    pub peer: Option<&'a str>,
}

impl<'a> CallMetadata<'a> {
    pub fn new(operation: &'a str) -> Self {
        Self {
            operation,
            authorization: None,
            peer: None,
        }
    }

    pub fn with_authorization(mut self, authorization: Option<&'a str>) -> Self {
        self.authorization = authorization;
        self
    }

    pub fn with_peer(mut self, peer: Option<&'a str>) -> Self {
        self.peer = peer;
        self
    }
}

/// Request-scoped result of a successful guard pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    pub operation: String,
    /// Verified principal; `None` on public operations
    pub principal: Option<Principal>,
    /// Identity the rate-limit counter was charged to
    pub caller: CallerIdentity,
}

impl CallContext {
    pub fn principal_id(&self) -> Option<Uuid> {
        self.principal.as_ref().map(|p| p.id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }
}

/// A request that passed the guard, carried together with its context
///
/// Handlers rely on the attached principal and never look at credentials.
#[derive(Debug, Clone)]
pub struct Authenticated<T> {
    context: CallContext,
    inner: T,
}

impl<T> Authenticated<T> {
    pub fn new(context: CallContext, inner: T) -> Self {
        Self { context, inner }
    }

    pub fn context(&self) -> &CallContext {
        &self.context
    }

    pub fn principal_id(&self) -> Option<Uuid> {
        self.context.principal_id()
    }

    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }

    pub fn into_parts(self) -> (CallContext, T) {
        (self.context, self.inner)
    }

    /// Carry the same context over a different payload
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Authenticated<U> {
        Authenticated {
            context: self.context,
            inner: f(self.inner),
        }
    }
}
