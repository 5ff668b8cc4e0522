use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{MIN_CARD_NUMBER_LEN, PAYMENT_PROCESSING_MS};

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("invalid card number")]
    CardRejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BillingAddress {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub card_number: String,
    #[serde(default)]
    pub card_holder: String,
    #[serde(default)]
    pub expiry_date: String,
    #[serde(default)]
    pub cvv: String,
    #[serde(default)]
    pub billing_address: BillingAddress,
}

/// Simulated payment authorization. Must succeed before a booking is
/// created; rejects deterministically on a card number that fails the
/// minimal format check.
pub async fn authorize(payment: &PaymentInfo) -> Result<(), PaymentError> {
    // Simulate processor round-trip
    tokio::time::sleep(Duration::from_millis(PAYMENT_PROCESSING_MS)).await;

    if payment.card_number.len() < MIN_CARD_NUMBER_LEN {
        warn!(
            "Payment authorization rejected: card number too short ({} chars)",
            payment.card_number.len()
        );
        return Err(PaymentError::CardRejected);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(card_number: &str) -> PaymentInfo {
        PaymentInfo {
            card_number: card_number.to_string(),
            card_holder: "Ada Lovelace".to_string(),
            expiry_date: "12/30".to_string(),
            cvv: "123".to_string(),
            billing_address: BillingAddress::default(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_card_number_is_rejected() {
        let result = authorize(&payment("1234567890")).await;
        assert!(matches!(result, Err(PaymentError::CardRejected)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_thirteen_digit_card_number_is_accepted() {
        assert!(authorize(&payment("4242424242424")).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_length_card_number_is_accepted() {
        assert!(authorize(&payment("4242424242424242")).await.is_ok());
    }
}
