//! Fees sub-client.

use crate::client::CorridorClient;
use crate::domain::fees::{FeeQuote, FeeRequest};
use crate::error::SdkError;

/// Sub-client for the external fee engine.
pub struct Fees<'a> {
    pub(crate) client: &'a CorridorClient,
}

impl Fees<'_> {
    /// Ask the engine for a fee quote and recommended route.
    pub async fn calculate(&self, request: &FeeRequest) -> Result<FeeQuote, SdkError> {
        request
            .validate()
            .map_err(|e| SdkError::Validation(e.to_string()))?;
        let record = self.client.http.calculate_fees(request).await?;
        Ok(record.into())
    }
}
