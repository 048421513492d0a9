use crate::application::pocket::PocketEngine;
use crate::application::transfer::TransferEngine;
use crate::domain::account::{AccountDraft, AccountId, AccountStatus, Balance};
use crate::domain::pocket::{PocketDraft, PocketId};
use crate::domain::ports::LedgerStoreRef;
use crate::error::{LedgerError, NotFoundError, Result};
use crate::interfaces::csv::operation_reader::{OpKind, OperationRecord};
use crate::interfaces::csv::report_writer::{RecordKind, ReportRow};
use log::info;
use std::str::FromStr;

/// Applies operation records against the engines and assembles the final
/// state report.
///
/// The driver keeps a script-local registry mapping labels to the record
/// identities the store assigned, so later rows can reference earlier ones.
/// A reference that matches no label is parsed as a literal identifier,
/// which is how scripts address records persisted by earlier runs.
pub struct OperationDriver {
    store: LedgerStoreRef,
    transfers: TransferEngine,
    pockets: PocketEngine,
    account_labels: Vec<(String, AccountId)>,
    pocket_labels: Vec<(String, PocketId)>,
}

impl OperationDriver {
    pub fn new(store: LedgerStoreRef) -> Self {
        Self {
            transfers: TransferEngine::new(store.clone()),
            pockets: PocketEngine::new(store.clone()),
            store,
            account_labels: Vec::new(),
            pocket_labels: Vec::new(),
        }
    }

    /// Applies one operation. A failed operation leaves the ledger
    /// untouched and does not invalidate the driver; the caller decides how
    /// to surface the error.
    pub async fn apply(&mut self, record: OperationRecord) -> Result<()> {
        match record.op {
            OpKind::Open => self.open_account(record).await,
            OpKind::Block => self.block_account(record).await,
            OpKind::Transfer => {
                let origin = self.resolve_account(&record.source)?;
                let target = record.target.as_deref().ok_or_else(|| {
                    LedgerError::InvalidOperation("transfer needs a target account".to_string())
                })?;
                let destination = self.resolve_account(target)?;
                self.transfers
                    .transfer(origin, destination, record.amount)
                    .await
            }
            OpKind::CreatePocket => self.create_pocket(record).await,
            OpKind::Move => {
                let account = self.resolve_account(&record.source)?;
                let target = record.target.as_deref().ok_or_else(|| {
                    LedgerError::InvalidOperation("move needs a target pocket".to_string())
                })?;
                let pocket = self.resolve_pocket(target)?;
                self.pockets
                    .move_to_pocket(account, pocket, record.amount)
                    .await
            }
        }
    }

    /// Reads the committed state and renders one row per record, each
    /// account directly followed by its pockets.
    pub async fn report(&self) -> Result<Vec<ReportRow>> {
        let txn = self.store.begin().await?;

        let mut accounts = txn.accounts().await?;
        accounts.sort_by_key(|account| account.id);

        let mut rows = Vec::new();
        for account in accounts {
            let mut pockets = txn.pockets_of(account.id).await?;
            pockets.sort_by_key(|pocket| pocket.id);

            rows.push(ReportRow {
                kind: RecordKind::Account,
                source: self.account_label(account.id),
                name: None,
                balance: account.balance,
                status: Some(account.status),
                id: account.id.to_string(),
            });
            for pocket in pockets {
                rows.push(ReportRow {
                    kind: RecordKind::Pocket,
                    source: self.pocket_label(pocket.id),
                    name: Some(pocket.name),
                    balance: pocket.balance,
                    status: None,
                    id: pocket.id.to_string(),
                });
            }
        }
        Ok(rows)
    }

    async fn open_account(&mut self, record: OperationRecord) -> Result<()> {
        let label = non_empty(&record.source, "open needs an account label")?;
        if self.account_labels.iter().any(|(known, _)| known == label) {
            return Err(LedgerError::InvalidOperation(format!(
                "account label \"{label}\" is already taken"
            )));
        }

        let draft = AccountDraft {
            balance: record.amount.map(Balance::new),
            status: AccountStatus::Active,
        };
        let mut txn = self.store.begin().await?;
        let account = txn.insert_account(draft).await?;
        txn.commit().await?;

        info!("opened account {} for label \"{label}\"", account.id);
        self.account_labels.push((label.to_string(), account.id));
        Ok(())
    }

    async fn block_account(&mut self, record: OperationRecord) -> Result<()> {
        let account = self.resolve_account(&record.source)?;

        let mut txn = self.store.begin().await?;
        let mut found = txn
            .find_account(account)
            .await?
            .ok_or(NotFoundError::Account(account))?;
        found.status = AccountStatus::Blocked;
        txn.save_account(found);
        txn.commit().await?;

        info!("blocked account {account}");
        Ok(())
    }

    async fn create_pocket(&mut self, record: OperationRecord) -> Result<()> {
        let account = self.resolve_account(&record.source)?;
        let name = record.name.ok_or_else(|| {
            LedgerError::InvalidOperation("create-pocket needs a name".to_string())
        })?;
        if let Some(label) = record.target.as_deref() {
            if self.pocket_labels.iter().any(|(known, _)| known == label) {
                return Err(LedgerError::InvalidOperation(format!(
                    "pocket label \"{label}\" is already taken"
                )));
            }
        }

        let pocket = self
            .pockets
            .create_pocket(account, PocketDraft::named(name))
            .await?;
        if let Some(label) = record.target {
            self.pocket_labels.push((label, pocket.id));
        }
        Ok(())
    }

    fn resolve_account(&self, reference: &str) -> Result<AccountId> {
        let reference = non_empty(reference, "missing account reference")?;
        if let Some((_, id)) = self
            .account_labels
            .iter()
            .find(|(label, _)| label == reference)
        {
            return Ok(*id);
        }
        AccountId::from_str(reference).map_err(|_| {
            LedgerError::InvalidOperation(format!("unknown account reference \"{reference}\""))
        })
    }

    fn resolve_pocket(&self, reference: &str) -> Result<PocketId> {
        let reference = non_empty(reference, "missing pocket reference")?;
        if let Some((_, id)) = self
            .pocket_labels
            .iter()
            .find(|(label, _)| label == reference)
        {
            return Ok(*id);
        }
        PocketId::from_str(reference).map_err(|_| {
            LedgerError::InvalidOperation(format!("unknown pocket reference \"{reference}\""))
        })
    }

    fn account_label(&self, id: AccountId) -> String {
        self.account_labels
            .iter()
            .find(|(_, known)| *known == id)
            .map(|(label, _)| label.clone())
            .unwrap_or_default()
    }

    fn pocket_label(&self, id: PocketId) -> String {
        self.pocket_labels
            .iter()
            .find(|(_, known)| *known == id)
            .map(|(label, _)| label.clone())
            .unwrap_or_default()
    }
}

fn non_empty<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(LedgerError::InvalidOperation(what.to_string()));
    }
    Ok(value)
}
