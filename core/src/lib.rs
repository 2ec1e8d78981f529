//! View-state core for a to-do list backed by a remote CRUD API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of the client sits a
//! reducer-style store that keeps the local list consistent with the remote
//! collection through optimistic updates and rollback on failure.
//!
//! # Design
//! - `TodoClient` is stateless — it holds only `base_url` and the user id.
//! - `TodoState` changes only through `TodoState::apply(Action)`.
//! - `Session` is the context object hosts drive: intents return
//!   `PendingRequest`s, and `Session::complete` reconciles their outcomes.
//! - `ViewModel` is what a rendering surface reads.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod filter;
pub mod http;
pub mod session;
pub mod state;
pub mod types;
pub mod view;

pub use client::TodoClient;
pub use error::{ApiError, ErrorBanner, ErrorMessage, DEFAULT_ERROR_TIMEOUT};
pub use filter::StatusFilter;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::{PendingOp, PendingRequest, Session};
pub use state::{Action, EditDraft, TodoState};
pub use types::{CreateTodo, Todo, TodoId, UpdateTodo, PLACEHOLDER_ID};
pub use view::{FooterView, HeaderView, RowView, ViewModel};
