use async_trait::async_trait;
use donation_engine::domain::charity::Charity;
use donation_engine::domain::gateway::{Charge, ChargeRequest, CredentialInfo, GatewayError};
use donation_engine::domain::ports::{CharityStore, PaymentGateway};
use donation_engine::infrastructure::in_memory::InMemoryCharityStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Copy)]
pub enum GatewayBehavior {
    Paid,
    Unpaid,
    Fail(&'static str),
}

/// A scripted gateway that counts calls, so tests can assert which requests
/// never reached the processor.
pub struct RecordingGateway {
    behavior: GatewayBehavior,
    pub charges: Arc<AtomicUsize>,
    pub retrievals: Arc<AtomicUsize>,
}

impl RecordingGateway {
    pub fn new(behavior: GatewayBehavior) -> Self {
        Self {
            behavior,
            charges: Arc::new(AtomicUsize::new(0)),
            retrievals: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn counters(&self) -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
        (self.charges.clone(), self.retrievals.clone())
    }
}

#[async_trait]
impl PaymentGateway for RecordingGateway {
    async fn create_charge(
        &self,
        request: ChargeRequest,
    ) -> Result<Charge, GatewayError> {
        self.charges.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            GatewayBehavior::Paid => Ok(Charge {
                amount: request.amount,
                paid: true,
            }),
            GatewayBehavior::Unpaid => Ok(Charge {
                amount: request.amount,
                paid: false,
            }),
            GatewayBehavior::Fail(code) => {
                Err(GatewayError::new(code, "charge could not be completed"))
            }
        }
    }

    async fn retrieve_credential(
        &self,
        token: &str,
    ) -> Result<CredentialInfo, GatewayError> {
        self.retrievals.fetch_add(1, Ordering::SeqCst);
        Ok(CredentialInfo {
            name: "J DOE".to_string(),
            last_digits: token.chars().rev().take(4).collect(),
            expiration_month: 10,
            expiration_year: 2030,
            security_code_check: false,
        })
    }
}

pub async fn seed_charities(names: &[&str]) -> InMemoryCharityStore {
    let store = InMemoryCharityStore::new();
    for (i, name) in names.iter().enumerate() {
        store
            .insert(Charity::new(i as u32 + 1, *name).unwrap())
            .await
            .unwrap();
    }
    store
}
