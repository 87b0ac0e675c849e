//! Conversion: FeeQuoteRecord → FeeQuote.

use super::wire;
use super::{FeeBreakdown, FeeQuote, ProviderRoute};

impl From<wire::FeeQuoteRecord> for FeeQuote {
    fn from(source: wire::FeeQuoteRecord) -> Self {
        FeeQuote {
            total_fee: source.total_fee,
            fee_breakdown: FeeBreakdown {
                platform_fee: source.fee_breakdown.platform_fee,
                onramp_fee: source.fee_breakdown.onramp_fee,
                offramp_fee: source.fee_breakdown.offramp_fee,
                volatility_premium: source.fee_breakdown.volatility_premium,
                risk_premium: source.fee_breakdown.risk_premium,
            },
            recommended_provider: ProviderRoute {
                onramp: source.recommended_provider.onramp,
                offramp: source.recommended_provider.offramp,
                chain: source.recommended_provider.chain,
                reasoning: source.recommended_provider.reasoning,
            },
            fee_explanation: source.fee_explanation,
            estimated_settlement_time: source.estimated_settlement_time,
            // The engine promises [0, 1]; clamp advisory data instead of
            // rejecting the whole quote over it.
            confidence_score: source.confidence_score.clamp(0.0, 1.0),
            risk_factors: source.risk_factors.unwrap_or_default(),
        }
    }
}
