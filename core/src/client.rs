//! Stateless HTTP request builder and response parser for the list API.
//!
//! # Design
//! `SyncClient` holds only a `base_url`. Each network operation is split into
//! a `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The host executes the round-trip in
//! between, so a pending operation is just a request nobody has answered yet.

use crate::error::SyncError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::Item;

/// Path of the read endpoint, relative to the base URL.
pub const FETCH_ALL_PATH: &str = "/api/all";
/// Path of the write endpoint, relative to the base URL.
pub const POST_ITEM_PATH: &str = "/api/add";

/// Stateless client for the list API.
#[derive(Debug, Clone)]
pub struct SyncClient {
    base_url: String,
}

impl SyncClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_fetch_all(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}{FETCH_ALL_PATH}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// The body is the item's text as a JSON string, nothing else.
    pub fn build_post_item(&self, item: &Item) -> Result<HttpRequest, SyncError> {
        let body = serde_json::to_string(item).map_err(|e| SyncError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}{POST_ITEM_PATH}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn parse_fetch_all(&self, response: HttpResponse) -> Result<Vec<Item>, SyncError> {
        if response.status != 200 {
            return Err(server_error(response));
        }
        serde_json::from_str(&response.body).map_err(|e| SyncError::Decode(e.to_string()))
    }

    /// Any 2xx counts as persisted. The body is ignored.
    pub fn parse_post_item(&self, response: HttpResponse) -> Result<(), SyncError> {
        if !response.is_success() {
            return Err(server_error(response));
        }
        Ok(())
    }
}

fn server_error(response: HttpResponse) -> SyncError {
    SyncError::Server {
        status: response.status,
        body: response.body,
    }
}
