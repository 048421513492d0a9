use crate::domain::account::{Account, AccountDraft, AccountId};
use crate::domain::pocket::{Pocket, PocketDraft, PocketId};
use crate::domain::ports::{LedgerStore, LedgerTxn, LedgerTxnBox};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};

#[derive(Default)]
struct Records {
    accounts: HashMap<AccountId, Account>,
    pockets: HashMap<PocketId, Pocket>,
}

/// Volatile store keeping every record in process memory. This is the
/// default backend; all state is lost when the process exits.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    records: Arc<RwLock<Records>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedger {
    async fn begin(&self) -> Result<LedgerTxnBox> {
        // The scope owns the write lock for its whole lifetime, so scopes
        // serialize with each other regardless of which records they touch.
        let records = self.records.clone().write_owned().await;
        Ok(Box::new(InMemoryTxn {
            records,
            staged_accounts: Vec::new(),
            staged_pockets: Vec::new(),
        }))
    }
}

struct InMemoryTxn {
    records: OwnedRwLockWriteGuard<Records>,
    staged_accounts: Vec<Account>,
    staged_pockets: Vec<Pocket>,
}

#[async_trait]
impl LedgerTxn for InMemoryTxn {
    async fn find_account(&self, id: AccountId) -> Result<Option<Account>> {
        Ok(self.records.accounts.get(&id).cloned())
    }

    async fn find_pocket(&self, id: PocketId) -> Result<Option<Pocket>> {
        Ok(self.records.pockets.get(&id).cloned())
    }

    async fn accounts(&self) -> Result<Vec<Account>> {
        Ok(self.records.accounts.values().cloned().collect())
    }

    async fn pockets_of(&self, account: AccountId) -> Result<Vec<Pocket>> {
        Ok(self
            .records
            .pockets
            .values()
            .filter(|pocket| pocket.owner == account)
            .cloned()
            .collect())
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

    async fn commit(mut self: Box<Self>) -> Result<()> {
        for account in std::mem::take(&mut self.staged_accounts) {
            self.records.accounts.insert(account.id, account);
        }
        for pocket in std::mem::take(&mut self.staged_pockets) {
            self.records.pockets.insert(pocket.id, pocket);
        }
        Ok(())
    }
}
