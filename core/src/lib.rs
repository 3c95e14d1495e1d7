//! Blocking client for the customer.io track API.
//!
//! # Overview
//! Three operations, each a single form-encoded HTTP request: identify a
//! customer (`PUT /customers/{id}`), delete a customer
//! (`DELETE /customers/{id}`) and track an event
//! (`POST /customers/{id}/events`). Credentials travel as HTTP Basic userinfo
//! in the request URL.
//!
//! ```no_run
//! use customerio_core::{Attributes, CustomerIoClient};
//!
//! let client = CustomerIoClient::new("site-id", "api-key");
//! let mut attributes = Attributes::new();
//! attributes.insert("email".to_string(), "bob@example.com".to_string());
//! client.identify("1", &attributes)?;
//!
//! let mut properties = Attributes::new();
//! properties.insert("plan".to_string(), "premium".to_string());
//! let response = client.track("1", "signed_up", &properties)?;
//! if !response.is_success() {
//!     eprintln!("track API rejected the event: {}", response.status);
//! }
//! # Ok::<(), customerio_core::TransportError>(())
//! ```
//!
//! # Design
//! - `CustomerIoClient` is stateless apart from its config and transport.
//! - Requests are built as plain data (`build_*`) and sent through the
//!   `Transport` trait, so tests can replace the network with a double.
//! - HTTP error statuses are returned, not raised; only an incomplete round
//!   trip is a `TransportError`.

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod transport;
pub mod types;

pub use client::CustomerIoClient;
pub use config::ClientConfig;
pub use error::{ConfigError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::Attributes;
