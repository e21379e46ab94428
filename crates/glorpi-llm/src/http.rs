//! Shared HTTP exchange
//!
//! Every adapter builds a [`ProviderRequest`] and hands it here. This module
//! owns the parts that are identical across providers: cancellation, latency,
//! reading the error body and keeping the API key out of surfaced text.

use crate::error::{Error, Result};
use crate::types::{ProviderRequest, ProviderResponse};
use crate::util::{mask_url_key, redact_secret};
use glorpi_core::ProviderId;
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// How a provider reports errors in its response body
#[derive(Debug, Clone, Copy)]
pub(crate) struct ErrorDialect {
    /// Provider the errors come from
    pub provider: ProviderId,
    /// Message used when the body carries none
    pub fallback_message: &'static str,
    /// Field under `error` holding the machine-readable code
    pub code_field: &'static str,
}

/// Build a reqwest client with the given timeout
pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::Network(e.to_string()))
}

/// Send `request`, racing it against `cancel`, and normalize the outcome.
///
/// `parse` turns a successful JSON body into a completed response.
pub(crate) async fn execute<F>(
    client: &Client,
    request: ProviderRequest,
    dialect: ErrorDialect,
    secret: &str,
    cancel: &CancellationToken,
    parse: F,
) -> ProviderResponse
where
    F: FnOnce(&Value) -> ProviderResponse,
{
    let started = Instant::now();

    let outcome = tokio::select! {
        biased;
        () = cancel.cancelled() => Err(Error::Cancelled),
        result = exchange(client, &request, dialect, secret) => result,
    };

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    match outcome {
        Ok(body) => parse(&body).with_raw(body).with_latency_ms(latency_ms),
        Err(err) => {
            match &err {
                Error::Cancelled => {
                    warn!(provider = %dialect.provider, latency_ms, "Request cancelled");
                }
                Error::Api { status, code, .. } => {
                    warn!(provider = %dialect.provider, status, code = %code, "Provider returned an error");
                }
                other => {
                    warn!(provider = %dialect.provider, error = %other, "Request failed");
                }
            }
            ProviderResponse::failed(&err).with_latency_ms(latency_ms)
        }
    }
}

async fn exchange(
    client: &Client,
    request: &ProviderRequest,
    dialect: ErrorDialect,
    secret: &str,
) -> Result<Value> {
    debug!(
        provider = %dialect.provider,
        url = %mask_url_key(&request.url),
        "Sending request to {}",
        dialect.provider.display_name()
    );

    let mut builder = client.post(&request.url);
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    let response = builder
        .json(&request.body)
        .send()
        .await
        .map_err(|e| network_error(e, secret))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| network_error(e, secret))?;
    let body: Option<Value> = serde_json::from_str(&text).ok();

    if !status.is_success() {
        return Err(api_error(
            dialect,
            status.as_u16(),
            body.as_ref(),
            secret,
        ));
    }

    body.ok_or_else(|| {
        Error::InvalidResponse(format!(
            "{} returned a non-JSON body",
            dialect.provider.display_name()
        ))
    })
}

fn network_error(err: reqwest::Error, secret: &str) -> Error {
    // The URL may carry the key as a query parameter.
    let message = err.without_url().to_string();
    Error::Network(redact_secret(&message, secret))
}

/// Structured error from a non-2xx body
pub(crate) fn api_error(
    dialect: ErrorDialect,
    status: u16,
    body: Option<&Value>,
    secret: &str,
) -> Error {
    let error = body.and_then(|b| b.get("error"));

    let message = error
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map_or_else(
            || dialect.fallback_message.to_string(),
            |m| redact_secret(m, secret),
        );

    let code = error
        .and_then(|e| e.get(dialect.code_field))
        .and_then(|c| match c {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| "api_error".to_string());

    Error::Api {
        provider: dialect.provider.as_str().to_string(),
        code,
        status,
        message,
    }
}

/// String at a JSON pointer, empty when absent
pub(crate) fn str_at(body: &Value, pointer: &str) -> String {
    body.pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Unsigned integer at a JSON pointer, zero when absent
pub(crate) fn u32_at(body: &Value, pointer: &str) -> u32 {
    body.pointer(pointer)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or_default()
}
