//! HTTP request and response types exchanged with a [`Transport`].
//!
//! # Design
//! Requests and responses are plain data. The client builds an `HttpRequest`
//! without touching the network and hands it to a transport, which returns an
//! `HttpResponse`. Keeping the wire shape as owned values lets test doubles
//! record exactly what would have been sent.
//!
//! The response deliberately has no body: the track API's replies are never
//! inspected, so transports release the body before returning.
//!
//! [`Transport`]: crate::transport::Transport

use std::fmt;

/// Content type attached to every request.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` is fully qualified and carries the account credentials in its
/// authority, so it should not be logged verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// The status line and headers of a response. The body has already been
/// released by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range.
    ///
    /// The client never consults this; it is here for callers that want to
    /// distinguish accepted from rejected deliveries.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
