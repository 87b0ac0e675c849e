//! Low-level HTTP client — `CorridorHttp`.
//!
//! One method per API endpoint. Returns wire types (conversion to domain
//! types happens at the sub-client boundary). Every failure is normalized to
//! an `HttpError` — callers never see an unclassified error.

use crate::domain::fees::wire::FeeQuoteRecord;
use crate::domain::fees::FeeRequest;
use crate::domain::payment::wire::{PaymentAckRecord, PaymentRecord};
use crate::domain::payment::PaymentRequest;
use crate::domain::quote::wire::QuoteRecord;
use crate::domain::quote::QuoteRequest;
use crate::error::HttpError;
use crate::http::retry::{RetryConfig, RetryPolicy};
use crate::shared::{IdempotencyKey, PaymentId};

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Header carrying the client-generated deduplication token on payment
/// creation.
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

/// Low-level HTTP client for the Corridor REST API.
pub struct CorridorHttp {
    base_url: String,
    client: Client,
}

impl CorridorHttp {
    pub fn new(base_url: &str) -> Self {
        let builder = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build().expect("Failed to build HTTP client"),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Quotes ───────────────────────────────────────────────────────────

    pub async fn create_quote(&self, body: &QuoteRequest) -> Result<QuoteRecord, HttpError> {
        let url = format!("{}/quotes", self.base_url);
        self.post(&url, body, None, RetryPolicy::None).await
    }

    // ── Payments ─────────────────────────────────────────────────────────

    pub async fn create_payment(
        &self,
        body: &PaymentRequest,
        key: &IdempotencyKey,
    ) -> Result<PaymentAckRecord, HttpError> {
        let url = format!("{}/payments", self.base_url);
        self.post(&url, body, Some(key), RetryPolicy::None).await
    }

    pub async fn get_payment(&self, id: &PaymentId) -> Result<PaymentRecord, HttpError> {
        let url = format!("{}/payments/{}", self.base_url, id);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    // ── Fees ─────────────────────────────────────────────────────────────

    /// POST in shape, read-only in effect: safe to retry.
    pub async fn calculate_fees(&self, body: &FeeRequest) -> Result<FeeQuoteRecord, HttpError> {
        let url = format!("{}/fees/calculate", self.base_url);
        self.post(&url, body, None, RetryPolicy::Idempotent).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str, retry: RetryPolicy) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::GET, url, None::<&()>, None, retry)
            .await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        idempotency_key: Option<&IdempotencyKey>,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::POST, url, Some(body), idempotency_key, retry)
            .await
    }

    async fn request_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
        idempotency_key: Option<&IdempotencyKey>,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let config = match &retry {
            RetryPolicy::None => {
                return self.do_request(&method, url, body, idempotency_key).await;
            }
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c.clone(),
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_request::<T, B>(&method, url, body, idempotency_key).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    let should_retry = match &e {
                        HttpError::Api { status, .. } | HttpError::Decode { status } => {
                            config.retryable_statuses.contains(status)
                        }
                        HttpError::RateLimited { retry_after_ms } => {
                            if let Some(ms) = retry_after_ms {
                                futures_timer::Delay::new(Duration::from_millis(*ms)).await;
                            }
                            true
                        }
                        HttpError::Transport(re) => {
                            re.is_connect() || re.is_timeout() || re.is_request()
                        }
                        HttpError::MaxRetriesExceeded { .. } => false,
                    };

                    if should_retry && attempt < config.max_retries {
                        let delay = config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request to {}",
                            url
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &reqwest::Method,
        url: &str,
        body: Option<&B>,
        idempotency_key: Option<&IdempotencyKey>,
    ) -> Result<T, HttpError> {
        let mut req = self.client.request(method.clone(), url);

        if let Some(key) = idempotency_key {
            req = req.header(IDEMPOTENCY_HEADER, key.as_str());
        }

        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await?;
            return Ok(parsed);
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .map(|secs| secs * 1000);
        let body_text = resp.text().await.unwrap_or_default();

        Err(normalize_failure(status_code, retry_after_ms, &body_text))
    }
}

impl Clone for CorridorHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
        }
    }
}

// ─── Error normalization ─────────────────────────────────────────────────────

/// Structured error body the backend sends on non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Normalize a non-2xx response into a structured error.
///
/// A parseable `{error, message}` body becomes `Api {kind, message}`; an
/// unparseable body is indistinguishable from a broken transport and is
/// classified accordingly.
fn normalize_failure(status: u16, retry_after_ms: Option<u64>, body: &str) -> HttpError {
    if status == 429 {
        return HttpError::RateLimited { retry_after_ms };
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => HttpError::Api {
            status,
            kind: parsed.error.unwrap_or_else(|| "API_ERROR".to_string()),
            message: parsed
                .message
                .unwrap_or_else(|| "An error occurred".to_string()),
        },
        Err(_) => HttpError::Decode { status },
    }
}
