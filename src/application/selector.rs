use crate::domain::charity::Charity;
use crate::domain::donation::CharitySelection;
use crate::domain::ports::{CharityStore, CharityStoreBox};
use crate::error::{DonationError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;

/// Resolves a [`CharitySelection`] to a single charity record.
///
/// Random selection is uniform over the charities currently in the store.
/// The RNG is owned here rather than by the store so tests can inject a
/// seeded one and make the pick reproducible.
pub struct CharitySelector {
    store: CharityStoreBox,
    rng: Mutex<StdRng>,
}

impl CharitySelector {
    pub fn new(store: CharityStoreBox) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }

    pub fn with_rng(store: CharityStoreBox, rng: StdRng) -> Self {
        Self {
            store,
            rng: Mutex::new(rng),
        }
    }

    /// Read-only resolution; fails with `InvalidCharity` when the id is
    /// absent or, for random selection, when no charities exist at all.
    pub async fn select(&self, selection: &CharitySelection) -> Result<Charity> {
        match selection {
            CharitySelection::Id(id) => self
                .store
                .find_by_id(*id)
                .await?
                .ok_or(DonationError::InvalidCharity),
            CharitySelection::Random => {
                let mut charities = self.store.all().await?;
                if charities.is_empty() {
                    return Err(DonationError::InvalidCharity);
                }
                let index = self.rng.lock().await.gen_range(0..charities.len());
                Ok(charities.swap_remove(index))
            }
        }
    }
}
