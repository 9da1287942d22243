//! Request builder and response parser for the autos resource.
//!
//! # Design
//! `AutosClient` holds only the base URL. Every operation comes as a pair: a
//! `build_*` method producing an `HttpRequest`, and a `parse_*` method turning
//! the matching `HttpResponse` into a typed result. The caller owns the
//! network in between, which keeps this crate free of I/O and runtimes.
//!
//! Any 2xx status is accepted as success; deployments of the API disagree on
//! whether creation answers 200 or 201.
//!
//! Record ids are opaque and go into the URL as a single percent-encoded
//! path segment. A list answer drops entries that cannot be read as a record
//! (logged at `warn`) instead of failing as a whole.

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ApiMessage, Car, CarRecord};

const COLLECTION: &str = "autos";

#[derive(Debug, Clone)]
pub struct AutosClient {
    base_url: String,
}

impl AutosClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/{COLLECTION}", self.base_url)
    }

    fn record_url(&self, id: &str) -> String {
        format!("{}/{COLLECTION}/{}", self.base_url, urlencoding::encode(id))
    }

    pub fn build_list_cars(&self) -> HttpRequest {
        HttpRequest::without_body(HttpMethod::Get, self.collection_url())
    }

    pub fn build_get_car(&self, id: &str) -> HttpRequest {
        HttpRequest::without_body(HttpMethod::Get, self.record_url(id))
    }

    pub fn build_create_car(&self, car: &Car) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::with_json(
            HttpMethod::Post,
            self.collection_url(),
            to_json(car)?,
        ))
    }

    /// The body is the complete record; the server replaces, it does not merge.
    pub fn build_update_car(&self, id: &str, car: &Car) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::with_json(
            HttpMethod::Put,
            self.record_url(id),
            to_json(car)?,
        ))
    }

    pub fn build_delete_car(&self, id: &str) -> HttpRequest {
        HttpRequest::without_body(HttpMethod::Delete, self.record_url(id))
    }

    pub fn parse_list_cars(&self, response: HttpResponse) -> Result<Vec<CarRecord>, ApiError> {
        let entries: Vec<serde_json::Value> = parse_json(response)?;
        let total = entries.len();
        let records: Vec<CarRecord> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping unreadable car record");
                    None
                }
            })
            .collect();
        if records.len() < total {
            tracing::warn!(kept = records.len(), total, "car list had unreadable records");
        }
        Ok(records)
    }

    pub fn parse_get_car(&self, response: HttpResponse) -> Result<CarRecord, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_car(&self, response: HttpResponse) -> Result<CarRecord, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_car(&self, response: HttpResponse) -> Result<CarRecord, ApiError> {
        parse_json(response)
    }

    /// Returns the server's confirmation message. An empty 2xx body is
    /// accepted too and yields an empty message.
    pub fn parse_delete_car(&self, response: HttpResponse) -> Result<ApiMessage, ApiError> {
        check_status(&response)?;
        if response.body.trim().is_empty() {
            return Ok(ApiMessage { msg: String::new() });
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

fn to_json(car: &Car) -> Result<String, ApiError> {
    serde_json::to_string(car).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map a non-2xx response to `NotFound` or `Http`, preferring the `{msg}`
/// field of a JSON error body over the raw text.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let msg = serde_json::from_str::<ApiMessage>(&response.body)
        .map(|m| m.msg)
        .unwrap_or_else(|_| response.body.clone());
    if response.status == 404 {
        return Err(ApiError::NotFound { msg });
    }
    Err(ApiError::Http {
        status: response.status,
        msg,
    })
}
