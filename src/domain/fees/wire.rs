//! Wire types for the fee engine endpoint.

use serde::Deserialize;

/// Raw fee calculation result as the engine sends it.
#[derive(Deserialize, Debug, Clone)]
pub struct FeeQuoteRecord {
    pub total_fee: i64,
    pub fee_breakdown: FeeBreakdownRecord,
    pub recommended_provider: ProviderRouteRecord,
    pub fee_explanation: String,
    pub estimated_settlement_time: String,
    pub confidence_score: f64,
    pub risk_factors: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FeeBreakdownRecord {
    pub platform_fee: i64,
    pub onramp_fee: i64,
    pub offramp_fee: i64,
    pub volatility_premium: i64,
    pub risk_premium: Option<i64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ProviderRouteRecord {
    pub onramp: String,
    pub offramp: String,
    pub chain: Option<String>,
    pub reasoning: String,
}
