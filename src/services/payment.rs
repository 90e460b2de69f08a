//! Simulated subscription payments. Nothing leaves the machine: the processor
//! validates the form, waits to mimic a gateway round-trip and issues a receipt.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::thread;
use std::time::Duration;

/// Monthly plans offered by the upsell prompt, in the local currency unit.
pub const PLANS: [u32; 2] = [10, 100];

pub const MOBILE_PROVIDERS: [&str; 2] = ["Airtel Money", "MTN Mobile Money"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethod {
    Card { number: String },
    Mobile { provider: String, phone: String },
}

impl PaymentMethod {
    pub fn label(&self) -> String {
        match self {
            PaymentMethod::Card { number } => {
                let skip = number.chars().count().saturating_sub(4);
                let tail: String = number.chars().skip(skip).collect();
                format!("card ending {}", tail)
            }
            PaymentMethod::Mobile { provider, phone } => format!("{} ({})", provider, phone),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub user_id: String,
    pub amount: u32,
    pub method: PaymentMethod,
}

/// Proof that the simulated transaction went through.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentReceipt {
    pub reference: String,
    pub user_id: String,
    pub amount: u32,
    pub method: String,
    pub processed_at: DateTime<Utc>,
}

pub trait PaymentProcessor {
    fn process(&self, request: &PaymentRequest, now: DateTime<Utc>) -> AppResult<PaymentReceipt>;
}

pub struct SimulatedPayments {
    delay: Duration,
}

impl SimulatedPayments {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

fn validate(request: &PaymentRequest) -> AppResult<()> {
    if !PLANS.contains(&request.amount) {
        return Err(AppError::Payment(format!(
            "unknown plan {}, choose one of {:?}",
            request.amount, PLANS
        )));
    }

    match &request.method {
        PaymentMethod::Card { number } => {
            let digits: String = number.chars().filter(|c| !c.is_whitespace()).collect();
            if !(12..=19).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
                return Err(AppError::Payment("invalid card number".into()));
            }
        }
        PaymentMethod::Mobile { provider, phone } => {
            if !MOBILE_PROVIDERS.contains(&provider.as_str()) {
                return Err(AppError::Payment(format!("unsupported provider '{}'", provider)));
            }
            let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
            if digits < 7 {
                return Err(AppError::Payment("invalid phone number".into()));
            }
        }
    }

    Ok(())
}

impl PaymentProcessor for SimulatedPayments {
    fn process(&self, request: &PaymentRequest, now: DateTime<Utc>) -> AppResult<PaymentReceipt> {
        validate(request)?;

        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        Ok(PaymentReceipt {
            reference: format!("SIM-{}-{}", request.user_id, now.timestamp_millis()),
            user_id: request.user_id.clone(),
            amount: request.amount,
            method: request.method.label(),
            processed_at: now,
        })
    }
}
