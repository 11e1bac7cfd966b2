use crate::domain::charity::MinorUnits;
use serde::Deserialize;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("charity selector must be a numeric id or \"random\"")]
pub struct ParseSelectionError;

/// How the donor picked a beneficiary: an explicit id, or the sentinel
/// asking the system to choose one uniformly at random.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(try_from = "String")]
pub enum CharitySelection {
    Id(u32),
    Random,
}

impl FromStr for CharitySelection {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("random") {
            return Ok(Self::Random);
        }
        s.parse::<u32>().map(Self::Id).map_err(|_| ParseSelectionError)
    }
}

impl TryFrom<String> for CharitySelection {
    type Error = ParseSelectionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A single donation attempt as it arrives from the outside. The amount is
/// kept raw until the normalizer has ruled on it. Never persisted.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct DonationRequest {
    pub amount: String,
    pub token: String,
    pub charity: CharitySelection,
}

/// Proof of a completed donation, returned for observability: the charged
/// amount and the charity's post-credit total.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DonationReceipt {
    pub charity_id: u32,
    pub charity_name: String,
    pub amount: MinorUnits,
    pub new_total: MinorUnits,
}
