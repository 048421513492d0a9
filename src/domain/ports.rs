use crate::domain::account::{Account, AccountDraft, AccountId};
use crate::domain::pocket::{Pocket, PocketDraft, PocketId};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type LedgerStoreRef = Arc<dyn LedgerStore>;
pub type LedgerTxnBox = Box<dyn LedgerTxn>;

/// Storage port consumed by the engines.
///
/// Every operation runs inside one scope obtained from [`begin`]: reads,
/// validation, staged writes, then a single atomic commit. The engines hold
/// the store as `Arc<dyn LedgerStore>` and carry no storage state of their
/// own.
///
/// [`begin`]: LedgerStore::begin
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Opens a transaction scope. Concurrent scopes touching the same
    /// records must serialize inside the implementation; the engines do not
    /// add mutual exclusion of their own.
    async fn begin(&self) -> Result<LedgerTxnBox>;
}

/// A single transaction scope.
///
/// Reads observe committed state. `save_*` and `insert_*` only stage;
/// nothing becomes visible until [`commit`] applies every staged write as
/// one atomic unit. Dropping the scope without committing discards the
/// staged writes, so an early return on a failed validation is a rollback.
///
/// [`commit`]: LedgerTxn::commit
#[async_trait]
pub trait LedgerTxn: Send {
    async fn find_account(&self, id: AccountId) -> Result<Option<Account>>;
    async fn find_pocket(&self, id: PocketId) -> Result<Option<Pocket>>;

    /// Every committed account record, in no particular order.
    async fn accounts(&self) -> Result<Vec<Account>>;

    /// The pockets owned by the given account, in no particular order.
    async fn pockets_of(&self, account: AccountId) -> Result<Vec<Pocket>>;

    /// Stages a new account record and returns it with a store-assigned
    /// identity.
    async fn insert_account(&mut self, draft: AccountDraft) -> Result<Account>;

    /// Stages a new pocket record bound to `owner` and returns it with a
    /// store-assigned identity.
    async fn insert_pocket(&mut self, owner: AccountId, draft: PocketDraft) -> Result<Pocket>;

    /// Stages a full-record write. Staging several records and committing
    /// once is how multiple mutations persist together or not at all.
    fn save_account(&mut self, account: Account);
    fn save_pocket(&mut self, pocket: Pocket);

    /// Consumes the scope, applying every staged write atomically.
    async fn commit(self: Box<Self>) -> Result<()>;
}
