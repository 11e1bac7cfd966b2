use crate::domain::gateway::{Charge, ChargeRequest, CredentialInfo, GatewayError};
use crate::domain::ports::PaymentGateway;
use async_trait::async_trait;

/// Token prefix the simulated processor recognizes as a valid credential.
pub const TOKEN_PREFIX: &str = "tokn_";

/// A deterministic stand-in for the external payment processor, used by the
/// CLI and demos. It never talks to a network:
///
/// - tokens starting with `tokn_` are recognized;
/// - recognized tokens containing `declined` produce an unpaid charge;
/// - anything else fails with gateway code `not_found`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedGateway;

impl SimulatedGateway {
    pub fn new() -> Self {
        Self
    }

    fn recognized(token: &str) -> bool {
        token.starts_with(TOKEN_PREFIX)
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn create_charge(&self, request: ChargeRequest) -> Result<Charge, GatewayError> {
        if !Self::recognized(&request.token) {
            return Err(GatewayError::new("not_found", "credential not recognized"));
        }
        Ok(Charge {
            amount: request.amount,
            paid: !request.token.contains("declined"),
        })
    }

    async fn retrieve_credential(&self, token: &str) -> Result<CredentialInfo, GatewayError> {
        if !Self::recognized(token) {
            return Err(GatewayError::new("not_found", "credential not recognized"));
        }
        Ok(CredentialInfo {
            name: "J DOE".to_string(),
            last_digits: "4242".to_string(),
            expiration_month: 10,
            expiration_year: 2030,
            security_code_check: false,
        })
    }
}
