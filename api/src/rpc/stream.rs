//! Streaming RPC guard
//!
//! The credential is checked once when the stream is opened; every message
//! that follows is handed out with the same context.

use futures_util::{Stream, StreamExt};
use std::{
    pin::Pin,
    task::{Context, Poll},
};
use tonic::{Request, Status};

use tt_core::services::{Authenticated, CallContext, GuardChain};

use super::metadata::RpcCall;

/// Inbound message stream of a call that passed the guard
#[derive(Debug)]
pub struct AuthenticatedStream<S> {
    context: CallContext,
    inner: S,
}

impl<S> AuthenticatedStream<S> {
    pub fn new(context: CallContext, inner: S) -> Self {
        Self { context, inner }
    }

    pub fn context(&self) -> &CallContext {
        &self.context
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, T> Stream for AuthenticatedStream<S>
where
    S: Stream<Item = Result<T, Status>> + Unpin,
{
    type Item = Result<Authenticated<T>, Status>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        match this.inner.poll_next_unpin(cx) {
            Poll::Ready(Some(Ok(message))) => {
                Poll::Ready(Some(Ok(Authenticated::new(this.context.clone(), message))))
            }
            Poll::Ready(Some(Err(status))) => Poll::Ready(Some(Err(status))),
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Guard an inbound stream for `method`
///
/// A rejected stream is refused before any message is read.
pub async fn guard_stream<S, T>(
    chain: &GuardChain,
    method: &str,
    request: Request<S>,
) -> Result<AuthenticatedStream<S>, Status>
where
    S: Stream<Item = Result<T, Status>> + Unpin,
{
    let context = RpcCall::from_request(&request).check(chain, method).await?;
    Ok(AuthenticatedStream::new(context, request.into_inner()))
}
