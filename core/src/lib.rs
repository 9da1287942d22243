//! I/O-free client core for the autos API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values for the
//! `/autos` resource without touching the network. Whoever embeds the core
//! (the `autos-ui` controller, a test harness) performs the round-trip.
//!
//! # Design
//! - `AutosClient` is stateless apart from its base URL.
//! - Each CRUD operation is split into `build_*` and `parse_*`.
//! - `Car` (no id) and `CarRecord` (with id) separate new from stored records.
//! - DTOs are defined independently from the mock-server crate; the
//!   integration tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use client::AutosClient;
pub use config::{ApiTarget, ClientConfig};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{ApiMessage, Car, CarRecord};
