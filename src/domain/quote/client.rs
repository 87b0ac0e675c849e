//! Quotes sub-client.

use crate::client::CorridorClient;
use crate::domain::quote::{Quote, QuoteRequest};
use crate::error::SdkError;

/// Sub-client for quote operations.
pub struct Quotes<'a> {
    pub(crate) client: &'a CorridorClient,
}

impl Quotes<'_> {
    /// Request a locked exchange-rate quote.
    ///
    /// Client-side validation runs first and blocks the call; an API error
    /// is surfaced immediately and is not retried here — re-invoke to retry.
    pub async fn create(&self, request: &QuoteRequest) -> Result<Quote, SdkError> {
        request
            .validate()
            .map_err(|e| SdkError::Validation(e.to_string()))?;
        let record = self.client.http.create_quote(request).await?;
        Quote::try_from(record).map_err(|e| SdkError::Validation(e.to_string()))
    }
}
