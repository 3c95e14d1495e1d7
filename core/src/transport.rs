//! The pluggable transport and its default ureq implementation.
//!
//! # Design
//! `Transport` is the one seam between the client and the network: a single
//! "send this request, return a response or an error" method. Tests swap in
//! recording doubles; production code uses `UreqTransport`.
//!
//! The track API authenticates with HTTP Basic credentials carried in the URL
//! authority. `UreqTransport` lifts them out of the URL into an
//! `Authorization` header before sending, so the request on the wire is the
//! same whichever HTTP stack sits underneath.

use std::fmt;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use percent_encoding::percent_decode_str;
use ureq::{Agent, RequestBuilder};
use url::Url;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Sends a prepared request.
///
/// Implementations must not treat HTTP error statuses as failures; only a
/// round trip that did not complete is an `Err`.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

/// Blocking transport backed by a `ureq::Agent`.
///
/// Timeouts, proxies and TLS settings belong on the agent; pass a configured
/// one to [`UreqTransport::with_agent`].
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn with_agent(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let (url, authorization) = split_credentials(&request.url)?;
        let auth = authorization.as_deref();
        let url = url.as_str();

        // DELETE never carries a body on this API.
        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Delete, _) => prepare(self.agent.delete(url), request, auth).call(),
            (HttpMethod::Post, Some(body)) => {
                prepare(self.agent.post(url), request, auth).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => prepare(self.agent.post(url), request, auth).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                prepare(self.agent.put(url), request, auth).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => prepare(self.agent.put(url), request, auth).send_empty(),
        };

        match result {
            Ok(response) => {
                let (parts, body) = response.into_parts();
                drop(body);
                let headers = parts
                    .headers
                    .iter()
                    .filter_map(|(name, value)| {
                        value
                            .to_str()
                            .ok()
                            .map(|v| (name.as_str().to_string(), v.to_string()))
                    })
                    .collect();
                Ok(HttpResponse {
                    status: parts.status.as_u16(),
                    headers,
                })
            }
            // An agent configured with http_status_as_error still yields a response.
            Err(ureq::Error::StatusCode(status)) => Ok(HttpResponse {
                status,
                headers: Vec::new(),
            }),
            Err(e) => Err(TransportError::with_source(
                format!("{} request failed", request.method),
                e,
            )),
        }
    }
}

fn prepare<B>(
    mut builder: RequestBuilder<B>,
    request: &HttpRequest,
    authorization: Option<&str>,
) -> RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(value) = authorization {
        builder = builder.header("Authorization", value);
    }
    builder
}

/// Strip userinfo from `raw` and turn it into a Basic `Authorization` value.
fn split_credentials(raw: &str) -> Result<(Url, Option<String>), TransportError> {
    let mut url =
        Url::parse(raw).map_err(|e| TransportError::with_source("invalid request url", e))?;
    if url.username().is_empty() && url.password().is_none() {
        return Ok((url, None));
    }

    let user = percent_decode_str(url.username()).decode_utf8_lossy().into_owned();
    let pass = url
        .password()
        .map(|p| percent_decode_str(p).decode_utf8_lossy().into_owned())
        .unwrap_or_default();
    let token = STANDARD.encode(format!("{user}:{pass}"));

    url.set_username("")
        .and_then(|()| url.set_password(None))
        .map_err(|()| TransportError::new("request url cannot carry credentials"))?;
    Ok((url, Some(format!("Basic {token}"))))
}
