//! RPC transport adapters
//!
//! Generated tonic services call [`guard_unary`] or [`guard_stream`] first
//! and work only with the returned [`Authenticated`](tt_core::Authenticated)
//! values.

mod metadata;
mod status;
mod stream;
mod unary;

pub use metadata::{method_path, AUTHORIZATION_KEY};
pub use status::rejection_status;
pub use stream::{guard_stream, AuthenticatedStream};
pub use unary::{guard_unary, guard_unary_for};
