use crate::domain::charity::{Charity, MinorUnits};
use crate::domain::ports::{CharityStore, CreditLedger};
use crate::error::{DonationError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Column Family for storing charity records.
pub const CF_CHARITIES: &str = "charities";

/// A persistent charity registry and ledger backed by RocksDB.
///
/// Rows are JSON-encoded `Charity` values keyed by big-endian id. Crediting
/// takes an in-process per-charity lock around the load-add-store cycle, so
/// concurrent credits through the same store never lose updates. `Clone`
/// shares the underlying `Arc<DB>` and the lock table.
#[derive(Clone)]
pub struct RocksDbCharityStore {
    db: Arc<DB>,
    locks: Arc<RwLock<HashMap<u32, Arc<Mutex<()>>>>>,
}

impl RocksDbCharityStore {
    /// Opens or creates a RocksDB instance at the specified path, ensuring
    /// the charities column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_charities = ColumnFamilyDescriptor::new(CF_CHARITIES, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_charities])?;

        Ok(Self {
            db: Arc::new(db),
            locks: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    fn cf(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(CF_CHARITIES)
            .ok_or_else(|| DonationError::Storage("charities column family not found".to_string()))
    }

    fn load(&self, id: u32) -> Result<Option<Charity>> {
        let cf = self.cf()?;
        match self.db.get_cf(cf, id.to_be_bytes())? {
            Some(bytes) => {
                let charity = serde_json::from_slice(&bytes).map_err(|e| {
                    DonationError::Storage(format!("failed to deserialize charity: {e}"))
                })?;
                Ok(Some(charity))
            }
            None => Ok(None),
        }
    }

    fn put(&self, charity: &Charity) -> Result<()> {
        let cf = self.cf()?;
        let value = serde_json::to_vec(charity)
            .map_err(|e| DonationError::Storage(format!("failed to serialize charity: {e}")))?;
        self.db.put_cf(cf, charity.id.to_be_bytes(), value)?;
        Ok(())
    }

    async fn row_lock(&self, id: u32) -> Arc<Mutex<()>> {
        {
            let locks = self.locks.read().await;
            if let Some(lock) = locks.get(&id) {
                return lock.clone();
            }
        }
        let mut locks = self.locks.write().await;
        locks.entry(id).or_default().clone()
    }
}

#[async_trait]
impl CharityStore for RocksDbCharityStore {
    async fn insert(&self, charity: Charity) -> Result<()> {
        if self.load(charity.id)?.is_some() {
            return Err(DonationError::Validation(format!(
                "charity {} already exists",
                charity.id
            )));
        }
        self.put(&charity)
    }

    async fn find_by_id(&self, id: u32) -> Result<Option<Charity>> {
        self.load(id)
    }

    async fn all(&self) -> Result<Vec<Charity>> {
        let cf = self.cf()?;
        let mut charities = Vec::new();
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            let charity: Charity = serde_json::from_slice(&value).map_err(|e| {
                DonationError::Storage(format!("failed to deserialize charity: {e}"))
            })?;
            charities.push(charity);
        }
        Ok(charities)
    }
}

#[async_trait]
impl CreditLedger for RocksDbCharityStore {
    async fn credit(&self, charity_id: u32, amount: MinorUnits) -> Result<MinorUnits> {
        if amount.is_zero() {
            return Err(DonationError::Ledger(
                "credit amount must be positive".to_string(),
            ));
        }

        let lock = self.row_lock(charity_id).await;
        let _guard = lock.lock().await;

        // Reload under the lock; the stored row is authoritative.
        let mut charity = self
            .load(charity_id)?
            .ok_or_else(|| DonationError::Ledger(format!("unknown charity {charity_id}")))?;
        let new_total = charity
            .total
            .checked_add(amount)
            .ok_or_else(|| DonationError::Ledger("charity total overflow".to_string()))?;
        charity.total = new_total;
        self.put(&charity)?;
        Ok(new_total)
    }
}
