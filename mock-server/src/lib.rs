//! In-memory stand-in for the customer.io track API.
//!
//! Mirrors the three endpoints the client uses, checks HTTP Basic
//! credentials, and records what it receives so tests can assert on it.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{post, put},
    Form, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};

pub type Fields = HashMap<String, String>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackedEvent {
    pub customer_id: String,
    pub name: String,
    pub data: Fields,
}

#[derive(Debug, Default)]
pub struct Store {
    pub customers: HashMap<String, Fields>,
    pub events: Vec<TrackedEvent>,
}

#[derive(Clone)]
pub struct AppState {
    site_id: Arc<str>,
    api_key: Arc<str>,
    pub store: Arc<RwLock<Store>>,
}

impl AppState {
    pub fn new(site_id: &str, api_key: &str) -> Self {
        Self {
            site_id: site_id.into(),
            api_key: api_key.into(),
            store: Arc::default(),
        }
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Basic "))
            .and_then(|token| STANDARD.decode(token).ok())
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .is_some_and(|pair| pair.split_once(':') == Some((&*self.site_id, &*self.api_key)))
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/customers/{id}",
            put(identify).delete(delete_customer),
        )
        .route("/api/v1/customers/{id}/events", post(track))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

async fn identify(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(attributes): Form<Fields>,
) -> StatusCode {
    if !state.authorized(&headers) {
        warn!(customer_id = %id, "rejected identify with bad credentials");
        return StatusCode::UNAUTHORIZED;
    }
    info!(customer_id = %id, fields = attributes.len(), "identify");
    state
        .store
        .write()
        .await
        .customers
        .entry(id)
        .or_default()
        .extend(attributes);
    StatusCode::OK
}

async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> StatusCode {
    if !state.authorized(&headers) {
        warn!(customer_id = %id, "rejected delete with bad credentials");
        return StatusCode::UNAUTHORIZED;
    }
    info!(customer_id = %id, "delete");
    state.store.write().await.customers.remove(&id);
    StatusCode::OK
}

async fn track(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(mut form): Form<Fields>,
) -> StatusCode {
    if !state.authorized(&headers) {
        warn!(customer_id = %id, "rejected event with bad credentials");
        return StatusCode::UNAUTHORIZED;
    }
    let Some(name) = form.remove("name") else {
        return StatusCode::BAD_REQUEST;
    };
    info!(customer_id = %id, event = %name, "track");
    let event = TrackedEvent {
        customer_id: id,
        name,
        data: nested_data(form),
    };
    state.store.write().await.events.push(event);
    StatusCode::OK
}

/// Collect `data[key]=value` fields into `key -> value`; other fields are dropped.
fn nested_data(form: Fields) -> Fields {
    form.into_iter()
        .filter_map(|(k, v)| {
            let key = k.strip_prefix("data[")?.strip_suffix(']')?;
            Some((key.to_string(), v))
        })
        .collect()
}
