//! Synchronous client core for the exercise service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO). The `view` module layers the list,
//! create and edit pages on top of the client as plain state machines.
//!
//! # Design
//! - `ExerciseClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit.
//! - DTOs are defined independently from the server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod types;
pub mod view;

pub use client::ExerciseClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{Exercise, ExerciseInput, Unit};
pub use view::{
    App, CreatePage, EditPage, ExerciseTable, HomePage, Notice, Outcome, Page, Route,
};
