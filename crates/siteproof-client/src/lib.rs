//! Mode-aware API client.
//!
//! Every outbound call goes through [`ApiClient::request`], which decides
//! per call, from an explicit [`RequestContext`] and never ambient state,
//! which backend partition to address and which credential to attach:
//!
//! - demo mode: the `/v1` path prefix is rewritten to `/demo` and the
//!   demo role preference travels in a trusted header;
//! - live mode: the path is untouched and a fresh bearer token is fetched
//!   from the [`TokenSource`].
//!
//! Responses are classified into structured HTTP failures, transport
//! failures, and decode failures; callers are expected to handle all
//! three. The client never retries.

mod cancel;
mod context;
mod dispatch;
mod error;
mod resources;
mod token;

pub use cancel::CancelToken;
pub use context::RequestContext;
pub use dispatch::{
    rewrite_path, ApiClient, Body, RequestOptions, API_PREFIX, DEMO_API_PREFIX, DEMO_ROLE_HEADER,
};
pub use error::ApiError;
pub use token::{StaticTokenSource, TokenSource};
