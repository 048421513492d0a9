use crate::domain::account::{AccountId, Amount};
use crate::domain::ports::LedgerStoreRef;
use crate::error::{BusinessRuleError, NotFoundError, Result};
use log::info;
use rust_decimal::Decimal;

/// Moves funds between two top-level accounts.
///
/// The engine holds no state besides the injected store; every call opens
/// its own transaction scope.
pub struct TransferEngine {
    store: LedgerStoreRef,
}

impl TransferEngine {
    pub fn new(store: LedgerStoreRef) -> Self {
        Self { store }
    }

    /// Transfers `amount` from `origin` to `destination`.
    ///
    /// Validations run in a fixed order and the first failure wins: the
    /// amount must be present and positive, the origin must exist, the
    /// destination must exist, the two accounts must differ, and the
    /// origin's effective balance must cover the amount. Nothing is staged
    /// until every check has passed; the two balance writes then commit as
    /// one atomic unit, so a signaled error always corresponds to zero
    /// state change.
    ///
    /// An absent destination balance counts as zero before the credit. The
    /// account status is not consulted here; a blocked account can still
    /// send and receive.
    pub async fn transfer(
        &self,
        origin: AccountId,
        destination: AccountId,
        amount: Option<Decimal>,
    ) -> Result<()> {
        info!("starting transfer from account {origin} to account {destination}");
        let mut txn = self.store.begin().await?;

        let amount = Amount::require(amount)?;
        let mut origin_account = txn
            .find_account(origin)
            .await?
            .ok_or(NotFoundError::OriginAccount(origin))?;
        let mut destination_account = txn
            .find_account(destination)
            .await?
            .ok_or(NotFoundError::DestinationAccount(destination))?;
        if origin == destination {
            return Err(BusinessRuleError::SameAccount(origin).into());
        }

        origin_account.debit(amount)?;
        destination_account.credit(amount);

        txn.save_account(origin_account);
        txn.save_account(destination_account);
        txn.commit().await?;

        info!(
            "finished transfer of {} from account {origin} to account {destination}",
            amount.value()
        );
        Ok(())
    }
}
