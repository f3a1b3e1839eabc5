//! AgriMap HTTP - Backend adapter
//!
//! `HttpBackend` implements the parcel and notification ports against the
//! registration service's REST and server-sent-event endpoints.

pub mod backend;
pub mod sse;

pub use backend::HttpBackend;
pub use sse::{SseDecoder, SseEvent};
