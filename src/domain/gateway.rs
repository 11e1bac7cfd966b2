use crate::domain::charity::MinorUnits;
use thiserror::Error;

/// A charge the core asks the external processor to create. The token is an
/// opaque credential issued and validated entirely by the gateway.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ChargeRequest {
    pub amount: MinorUnits,
    pub currency: String,
    pub token: String,
    pub description: String,
}

/// What the processor reports back. Consumed once, never persisted. An
/// unpaid charge is a valid response and is distinct from a gateway error.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Charge {
    pub amount: MinorUnits,
    pub paid: bool,
}

#[derive(Error, Debug, PartialEq, Eq, Clone)]
#[error("{message} ({code})")]
pub struct GatewayError {
    pub code: String,
    pub message: String,
}

impl GatewayError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Card-like display info behind a token, used only to redisplay diagnostic
/// detail when a donation is rejected before charging.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CredentialInfo {
    pub name: String,
    pub last_digits: String,
    pub expiration_month: u8,
    pub expiration_year: u16,
    pub security_code_check: bool,
}
