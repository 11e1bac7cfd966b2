use crate::domain::charity::{Charity, MinorUnits};
use crate::domain::gateway::{Charge, ChargeRequest, CredentialInfo, GatewayError};
use crate::error::Result;
use async_trait::async_trait;

/// Read access to the charity registry, plus the administrative insert used
/// by seeding and operations tooling. The donation flow itself never
/// inserts; it only reads here and credits through [`CreditLedger`].
#[async_trait]
pub trait CharityStore: Send + Sync {
    async fn insert(&self, charity: Charity) -> Result<()>;
    async fn find_by_id(&self, id: u32) -> Result<Option<Charity>>;
    async fn all(&self) -> Result<Vec<Charity>>;
}

/// The single mutation path for charity totals.
///
/// `credit` must behave as if serialized per charity: a read-modify-write
/// under a per-row lock, so concurrent credits to the same charity never
/// lose updates, while credits to different charities proceed independently.
/// Returns the post-credit total. Zero amounts and unknown charities are
/// ledger errors; any storage failure mid-credit leaves the total unchanged.
#[async_trait]
pub trait CreditLedger: Send + Sync {
    async fn credit(&self, charity_id: u32, amount: MinorUnits) -> Result<MinorUnits>;
}

/// The external payment processor. Creating a charge is the only operation
/// that moves money; credential retrieval only feeds failure diagnostics.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_charge(&self, request: ChargeRequest) -> Result<Charge, GatewayError>;
    async fn retrieve_credential(&self, token: &str) -> Result<CredentialInfo, GatewayError>;
}

pub type CharityStoreBox = Box<dyn CharityStore>;
pub type CreditLedgerBox = Box<dyn CreditLedger>;
pub type PaymentGatewayBox = Box<dyn PaymentGateway>;
