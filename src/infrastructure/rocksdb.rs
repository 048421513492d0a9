use crate::domain::account::{Account, AccountDraft, AccountId};
use crate::domain::pocket::{Pocket, PocketDraft, PocketId};
use crate::domain::ports::{LedgerStore, LedgerTxn, LedgerTxnBox};
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options, WriteBatch};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// Column family for account records.
pub const CF_ACCOUNTS: &str = "accounts";
/// Column family for pocket records.
pub const CF_POCKETS: &str = "pockets";

/// A persistent store implementation using RocksDB.
///
/// Accounts and pockets live in separate column families, serialized as
/// JSON and keyed by their identity bytes. This struct is thread-safe
/// (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbLedger {
    db: Arc<DB>,
    writer: Arc<Mutex<()>>,
}

impl RocksDbLedger {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families ("accounts" and "pockets")
    /// exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_accounts = ColumnFamilyDescriptor::new(CF_ACCOUNTS, Options::default());
        let cf_pockets = ColumnFamilyDescriptor::new(CF_POCKETS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_accounts, cf_pockets])?;

        Ok(Self {
            db: Arc::new(db),
            writer: Arc::new(Mutex::new(())),
        })
    }
}

fn missing_cf(name: &str) -> LedgerError {
    LedgerError::Io(std::io::Error::other(format!(
        "{name} column family not found"
    )))
}

#[async_trait]
impl LedgerStore for RocksDbLedger {
    async fn begin(&self) -> Result<LedgerTxnBox> {
        // The scope holds the store's single writer permit for its whole
        // lifetime, so scopes serialize with each other. Staged writes land
        // in one WriteBatch at commit.
        let permit = self.writer.clone().lock_owned().await;
        Ok(Box::new(RocksDbTxn {
            db: self.db.clone(),
            staged_accounts: Vec::new(),
            staged_pockets: Vec::new(),
            _permit: permit,
        }))
    }
}

struct RocksDbTxn {
    db: Arc<DB>,
    staged_accounts: Vec<Account>,
    staged_pockets: Vec<Pocket>,
    _permit: OwnedMutexGuard<()>,
}

#[async_trait]
impl LedgerTxn for RocksDbTxn {
    async fn find_account(&self, id: AccountId) -> Result<Option<Account>> {
        let cf = self
            .db
            .cf_handle(CF_ACCOUNTS)
            .ok_or_else(|| missing_cf(CF_ACCOUNTS))?;
        match self.db.get_cf(&cf, Uuid::from(id).into_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn find_pocket(&self, id: PocketId) -> Result<Option<Pocket>> {
        let cf = self
            .db
            .cf_handle(CF_POCKETS)
            .ok_or_else(|| missing_cf(CF_POCKETS))?;
        match self.db.get_cf(&cf, Uuid::from(id).into_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn accounts(&self) -> Result<Vec<Account>> {
        let cf = self
            .db
            .cf_handle(CF_ACCOUNTS)
            .ok_or_else(|| missing_cf(CF_ACCOUNTS))?;

        let mut accounts = Vec::new();
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            accounts.push(serde_json::from_slice(&value)?);
        }
        Ok(accounts)
    }

    async fn pockets_of(&self, account: AccountId) -> Result<Vec<Pocket>> {
        let cf = self
            .db
            .cf_handle(CF_POCKETS)
            .ok_or_else(|| missing_cf(CF_POCKETS))?;

        let mut pockets = Vec::new();
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            let pocket: Pocket = serde_json::from_slice(&value)?;
            if pocket.owner == account {
                pockets.push(pocket);
            }
        }
        Ok(pockets)
    }

    async fn insert_account(&mut self, draft: AccountDraft) -> Result<Account> {
        let account = Account {
            id: AccountId::random(),
            balance: draft.balance,
            status: draft.status,
        };
        self.staged_accounts.push(account.clone());
        Ok(account)
    }

    async fn insert_pocket(&mut self, owner: AccountId, draft: PocketDraft) -> Result<Pocket> {
        let pocket = Pocket {
            id: PocketId::random(),
            name: draft.name,
            balance: draft.balance,
            owner,
        };
        self.staged_pockets.push(pocket.clone());
        Ok(pocket)
    }

    fn save_account(&mut self, account: Account) {
        self.staged_accounts.push(account);
    }

    fn save_pocket(&mut self, pocket: Pocket) {
        self.staged_pockets.push(pocket);
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let cf_accounts = self
            .db
            .cf_handle(CF_ACCOUNTS)
            .ok_or_else(|| missing_cf(CF_ACCOUNTS))?;
        let cf_pockets = self
            .db
            .cf_handle(CF_POCKETS)
            .ok_or_else(|| missing_cf(CF_POCKETS))?;

        let mut batch = WriteBatch::default();
        for account in &self.staged_accounts {
            batch.put_cf(
                &cf_accounts,
                Uuid::from(account.id).into_bytes(),
                serde_json::to_vec(account)?,
            );
        }
        for pocket in &self.staged_pockets {
            batch.put_cf(
                &cf_pockets,
                Uuid::from(pocket.id).into_bytes(),
                serde_json::to_vec(pocket)?,
            );
        }
        self.db.write(batch)?;
        Ok(())
    }
}
