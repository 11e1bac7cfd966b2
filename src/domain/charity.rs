use crate::error::{DonationError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An exact count of minor currency units (e.g. satang, cents).
///
/// This is a wrapper around `u64` to keep all monetary arithmetic on
/// integers; decimals only exist at the parsing boundary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct MinorUnits(u64);

impl MinorUnits {
    pub const ZERO: Self = Self(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts, returning `None` on overflow of the running total.
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(sum) => Some(Self(sum)),
            None => None,
        }
    }
}

impl fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A beneficiary entity. Created administratively; its `total` is only ever
/// mutated through the ledger's atomic credit operation and never decreases.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Charity {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub total: MinorUnits,
}

impl Charity {
    pub fn new(id: u32, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DonationError::Validation(
                "charity name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id,
            name,
            total: MinorUnits::ZERO,
        })
    }
}
