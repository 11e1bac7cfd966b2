use crate::domain::charity::MinorUnits;

/// Validation policy for incoming donations.
///
/// Both historical revisions of the policy are reachable by configuration
/// alone: a whole-unit regime (factor 1, minimum 20) and a decimal-aware
/// regime (factor 100, minimum 2000 minor units). The default is the latter.
#[derive(Debug, Clone)]
pub struct DonationPolicy {
    /// ISO currency code passed through to the gateway.
    pub currency: String,
    /// A donation must strictly exceed this many minor units.
    pub minimum: MinorUnits,
    /// Minor units per major unit, e.g. 100 satang per baht.
    pub minor_unit_factor: u32,
}

impl Default for DonationPolicy {
    fn default() -> Self {
        Self {
            currency: "THB".to_string(),
            minimum: MinorUnits::new(2_000),
            minor_unit_factor: 100,
        }
    }
}
