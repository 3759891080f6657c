//! Executes core `HttpRequest`s with a blocking ureq agent.

use list_sync_core::{HttpMethod, HttpRequest, HttpResponse, SyncError};

#[derive(Clone)]
pub struct Transport {
    agent: ureq::Agent,
}

impl Transport {
    pub fn new() -> Self {
        // 4xx/5xx come back as data; the core decides what they mean.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, SyncError> {
        tracing::debug!(method = req.method.as_str(), url = %req.url, "executing request");

        let result = match (req.method, req.body.as_deref()) {
            (HttpMethod::Get, _) => self.agent.get(&req.url).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&req.url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&req.url).send_empty(),
        };
        let mut response = result.map_err(|e| SyncError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| SyncError::Network(e.to_string()))?;
        Ok(HttpResponse::new(status, body))
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}
