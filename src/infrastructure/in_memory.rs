use crate::domain::charity::{Charity, MinorUnits};
use crate::domain::ports::{CharityStore, CreditLedger};
use crate::error::{DonationError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// A thread-safe in-memory charity registry and ledger.
///
/// Each charity sits behind its own `Mutex`, so credits to the same charity
/// serialize against each other while credits to different charities run
/// independently. The outer `RwLock` only guards the map layout and is held
/// just long enough to clone the row handle.
///
/// `Clone` shares the underlying state, so one store can serve as both the
/// boxed [`CharityStore`] and the boxed [`CreditLedger`].
#[derive(Default, Clone)]
pub struct InMemoryCharityStore {
    rows: Arc<RwLock<HashMap<u32, Arc<Mutex<Charity>>>>>,
}

impl InMemoryCharityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CharityStore for InMemoryCharityStore {
    async fn insert(&self, charity: Charity) -> Result<()> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&charity.id) {
            return Err(DonationError::Validation(format!(
                "charity {} already exists",
                charity.id
            )));
        }
        rows.insert(charity.id, Arc::new(Mutex::new(charity)));
        Ok(())
    }

    async fn find_by_id(&self, id: u32) -> Result<Option<Charity>> {
        let rows = self.rows.read().await;
        match rows.get(&id) {
            Some(row) => Ok(Some(row.lock().await.clone())),
            None => Ok(None),
        }
    }

    async fn all(&self) -> Result<Vec<Charity>> {
        let rows = self.rows.read().await;
        let mut charities = Vec::with_capacity(rows.len());
        for row in rows.values() {
            charities.push(row.lock().await.clone());
        }
        Ok(charities)
    }
}

#[async_trait]
impl CreditLedger for InMemoryCharityStore {
    async fn credit(&self, charity_id: u32, amount: MinorUnits) -> Result<MinorUnits> {
        if amount.is_zero() {
            return Err(DonationError::Ledger(
                "credit amount must be positive".to_string(),
            ));
        }

        let row = {
            let rows = self.rows.read().await;
            rows.get(&charity_id)
                .cloned()
                .ok_or_else(|| DonationError::Ledger(format!("unknown charity {charity_id}")))?
        };

        // Holding the row mutex makes this read-modify-write atomic per
        // charity; the guarded row is the authoritative total.
        let mut charity = row.lock().await;
        let new_total = charity
            .total
            .checked_add(amount)
            .ok_or_else(|| DonationError::Ledger("charity total overflow".to_string()))?;
        charity.total = new_total;
        Ok(new_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store_with(charities: &[(u32, &str)]) -> InMemoryCharityStore {
        let store = InMemoryCharityStore::new();
        for (id, name) in charities {
            store
                .insert(Charity::new(*id, *name).unwrap())
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = store_with(&[(1, "Children")]).await;

        let charity = store.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(charity.name, "Children");
        assert_eq!(charity.total, MinorUnits::ZERO);

        assert!(store.find_by_id(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_id() {
        let store = store_with(&[(1, "Children")]).await;
        store.credit(1, MinorUnits::new(500)).await.unwrap();

        let result = store.insert(Charity::new(1, "Impostor").unwrap()).await;
        assert!(matches!(result, Err(DonationError::Validation(_))));

        // The original row, total included, is untouched.
        let charity = store.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(charity.name, "Children");
        assert_eq!(charity.total, MinorUnits::new(500));
    }

    #[tokio::test]
    async fn test_all_returns_every_charity() {
        let store = store_with(&[(1, "Children"), (2, "Elderly"), (3, "Wildlife")]).await;
        let all = store.all().await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_credit_returns_new_total() {
        let store = store_with(&[(1, "Children")]).await;

        let total = store.credit(1, MinorUnits::new(10_000)).await.unwrap();
        assert_eq!(total, MinorUnits::new(10_000));

        let total = store.credit(1, MinorUnits::new(77)).await.unwrap();
        assert_eq!(total, MinorUnits::new(10_077));
    }

    #[tokio::test]
    async fn test_credit_rejects_zero() {
        let store = store_with(&[(1, "Children")]).await;
        let result = store.credit(1, MinorUnits::ZERO).await;
        assert!(matches!(result, Err(DonationError::Ledger(_))));
    }

    #[tokio::test]
    async fn test_credit_unknown_charity() {
        let store = store_with(&[(1, "Children")]).await;
        let result = store.credit(99, MinorUnits::new(100)).await;
        assert!(matches!(result, Err(DonationError::Ledger(_))));
    }

    #[tokio::test]
    async fn test_credit_overflow_leaves_total_unchanged() {
        let store = store_with(&[(1, "Children")]).await;
        store.credit(1, MinorUnits::new(u64::MAX)).await.unwrap();

        let result = store.credit(1, MinorUnits::new(1)).await;
        assert!(matches!(result, Err(DonationError::Ledger(_))));

        let charity = store.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(charity.total, MinorUnits::new(u64::MAX));
    }

    #[tokio::test]
    async fn test_concurrent_credits_lose_nothing() {
        let store = store_with(&[(1, "Children")]).await;

        let mut handles = Vec::new();
        for _ in 0..100 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.credit(1, MinorUnits::new(250)).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let charity = store.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(charity.total, MinorUnits::new(25_000));
    }
}
