//! Conversion: QuoteRecord → Quote (TryFrom + validation).

use super::wire;
use super::{FeeLines, Quote};
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum QuoteDataError {
    #[error("exchange rate {0} is not representable")]
    InvalidRate(f64),

    #[error("exchange rate must be positive, got {0}")]
    NonPositiveRate(f64),

    #[error("quote validity window is zero")]
    ZeroValidity,
}

impl TryFrom<wire::QuoteRecord> for Quote {
    type Error = QuoteDataError;

    fn try_from(source: wire::QuoteRecord) -> Result<Self, Self::Error> {
        let exchange_rate = Decimal::try_from(source.exchange_rate)
            .map_err(|_| QuoteDataError::InvalidRate(source.exchange_rate))?;
        if exchange_rate <= Decimal::ZERO {
            return Err(QuoteDataError::NonPositiveRate(source.exchange_rate));
        }
        if source.valid_for_seconds == 0 {
            return Err(QuoteDataError::ZeroValidity);
        }

        Ok(Quote {
            quote_id: source.quote_id.into(),
            amount: source.amount,
            currency: source.currency,
            exchange_rate,
            fees: FeeLines {
                platform_fee: source.fees.platform_fee,
                onramp_fee: source.fees.onramp_fee,
                offramp_fee: source.fees.offramp_fee,
                total_fees: source.fees.total_fees,
                currency: source.fees.currency,
            },
            guaranteed_payout: source.guaranteed_payout,
            payout_currency: source.payout_currency,
            expires_at: source.expires_at,
            valid_for_seconds: source.valid_for_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(rate: f64, valid_for: u64) -> wire::QuoteRecord {
        wire::QuoteRecord {
            quote_id: "q_1".to_string(),
            amount: 100_000,
            currency: "USD".to_string(),
            exchange_rate: rate,
            fees: wire::FeeLinesRecord {
                platform_fee: 500,
                onramp_fee: 400,
                offramp_fee: 300,
                total_fees: 1200,
                currency: "USD".to_string(),
            },
            guaranteed_payout: 84_770,
            payout_currency: "EUR".to_string(),
            expires_at: Utc::now(),
            valid_for_seconds: valid_for,
        }
    }

    #[test]
    fn test_valid_record_converts() {
        let quote = Quote::try_from(record(0.858, 30)).unwrap();
        assert_eq!(quote.quote_id.as_str(), "q_1");
        assert_eq!(quote.fees.total_fees, 1200);
        assert_eq!(quote.exchange_rate, Decimal::try_from(0.858).unwrap());
    }

    #[test]
    fn test_nan_rate_rejected() {
        assert!(matches!(
            Quote::try_from(record(f64::NAN, 30)),
            Err(QuoteDataError::InvalidRate(_))
        ));
    }

    #[test]
    fn test_zero_rate_rejected() {
        assert_eq!(
            Quote::try_from(record(0.0, 30)).unwrap_err(),
            QuoteDataError::NonPositiveRate(0.0)
        );
    }

    #[test]
    fn test_zero_validity_rejected() {
        assert_eq!(
            Quote::try_from(record(0.858, 0)).unwrap_err(),
            QuoteDataError::ZeroValidity
        );
    }
}
