// src/client.rs
use crate::error::{LoadgenError, LoadgenResult};
use crate::types::{ActionOutcome, ActionRequest, Method};
use log::{debug, warn};
use reqwest::Client;
use std::time::Instant;

/// Thin wrapper around a shared reqwest client plus the target base URL.
///
/// HTTP-level failures (connect errors, non-2xx responses) are not errors
/// from the caller's point of view: they come back as failed outcomes so
/// the action loop keeps running and the counters pick them up. No retries,
/// no explicit timeout; the client defaults apply.
#[derive(Clone)]
pub struct ActionClient {
    http: Client,
    base_url: String,
}

impl ActionClient {
    pub fn new(base_url: impl Into<String>) -> LoadgenResult<Self> {
        let base_url = base_url.into();
        reqwest::Url::parse(&base_url)
            .map_err(|e| LoadgenError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        let http = Client::builder()
            .build()
            .map_err(|e| LoadgenError::NetworkError(format!("failed to build client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute one action request and report how it went.
    pub async fn execute(&self, request: &ActionRequest) -> ActionOutcome {
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let started = Instant::now();
        match builder.send().await {
            Ok(response) => {
                let status = response.status();
                let latency = started.elapsed();
                debug!(
                    "{} {} -> {} in {:?}",
                    request.kind.as_str(),
                    request.path,
                    status,
                    latency
                );
                ActionOutcome {
                    kind: request.kind,
                    status: Some(status.as_u16()),
                    latency,
                    success: status.is_success(),
                }
            }
            Err(e) => {
                let latency = started.elapsed();
                warn!("{} {} failed: {}", request.kind.as_str(), request.path, e);
                ActionOutcome {
                    kind: request.kind,
                    status: None,
                    latency,
                    success: false,
                }
            }
        }
    }
}
