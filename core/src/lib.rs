//! Client core that keeps a displayed list in sync with a server-held list.
//!
//! # Overview
//! Fetch the list, render it, submit new entries, refresh. The core builds
//! `HttpRequest` values and parses `HttpResponse` values without touching the
//! network (host-does-IO pattern); the host executes each `Command` and feeds
//! the outcome back to the `SubmissionHandler`.
//!
//! # Design
//! - `SyncClient` is stateless: it holds only `base_url`.
//! - `StateStore` is the only place the list lives; fetches replace it whole.
//! - `ListRenderer` projects the list onto any `Surface`.
//! - `SubmissionHandler` owns the other two, serializes writes and drops
//!   stale fetch results by sequence number.

pub mod client;
pub mod error;
pub mod handler;
pub mod http;
pub mod render;
pub mod store;
pub mod types;

pub use client::SyncClient;
pub use error::SyncError;
pub use handler::{Command, Phase, Submission, SubmissionHandler, Ticket};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use render::{ListElement, ListRenderer, MemorySurface, Surface};
pub use store::StateStore;
pub use types::Item;
