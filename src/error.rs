use crate::domain::amount::AmountError;
use crate::domain::gateway::CredentialInfo;
use thiserror::Error;

pub type Result<T, E = DonationError> = std::result::Result<T, E>;

/// Terminal failure classes of the donation pipeline. None of these are
/// retried inside the core.
#[derive(Error, Debug)]
pub enum DonationError {
    #[error("payment token is missing")]
    MissingToken,
    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),
    #[error("charity not found")]
    InvalidCharity,
    #[error("donation of {amount} is below the minimum of {minimum} minor units")]
    BelowMinimum { amount: u64, minimum: u64 },
    #[error("gateway error [{code}]: {message}")]
    Gateway { code: String, message: String },
    #[error("charge was created but not paid")]
    NotPaid,
    #[error("ledger error: {0}")]
    Ledger(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for DonationError {
    fn from(err: rocksdb::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Outcome of a rejected donation. Carries the failure reason together with
/// the card display info retrieved for the attempted credential, when the
/// gateway could provide it. The credential is diagnostic only and plays no
/// part in crediting.
#[derive(Error, Debug)]
#[error("{reason}")]
pub struct DonationFailure {
    pub reason: DonationError,
    pub credential: Option<CredentialInfo>,
}

impl From<DonationError> for DonationFailure {
    fn from(reason: DonationError) -> Self {
        Self {
            reason,
            credential: None,
        }
    }
}
