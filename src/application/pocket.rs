use crate::domain::account::{AccountId, AccountStatus, Amount};
use crate::domain::pocket::{Pocket, PocketDraft, PocketId};
use crate::domain::ports::LedgerStoreRef;
use crate::error::{BusinessRuleError, NotFoundError, Result};
use log::info;
use rust_decimal::Decimal;

/// Manages the savings pockets hanging off top-level accounts.
pub struct PocketEngine {
    store: LedgerStoreRef,
}

impl PocketEngine {
    pub fn new(store: LedgerStoreRef) -> Self {
        Self { store }
    }

    /// Creates a pocket under `account` and returns it with its
    /// store-assigned identity.
    ///
    /// The owning account must exist and be active, and no pocket of that
    /// account may already carry the draft's name. Names are compared
    /// case-sensitively, and only against siblings: two accounts can each
    /// own a pocket called "vacation". The draft's balance is stored
    /// untouched; this operation never funds the pocket.
    pub async fn create_pocket(&self, account: AccountId, draft: PocketDraft) -> Result<Pocket> {
        info!("creating pocket \"{}\" under account {account}", draft.name);
        let mut txn = self.store.begin().await?;

        let owner = txn
            .find_account(account)
            .await?
            .ok_or(NotFoundError::Account(account))?;
        if owner.status != AccountStatus::Active {
            return Err(BusinessRuleError::AccountNotActive(account).into());
        }
        let siblings = txn.pockets_of(account).await?;
        if siblings.iter().any(|pocket| pocket.name == draft.name) {
            return Err(BusinessRuleError::DuplicatePocketName {
                account,
                name: draft.name,
            }
            .into());
        }

        let pocket = txn.insert_pocket(account, draft).await?;
        txn.commit().await?;

        info!("created pocket {} under account {account}", pocket.id);
        Ok(pocket)
    }

    /// Moves `amount` out of `account` into `pocket`.
    ///
    /// Validations run in a fixed order and the first failure wins: the
    /// amount must be present and positive, the account must exist, the
    /// pocket must exist, and the account's effective balance must cover the
    /// amount. The debit and the credit commit as one atomic unit.
    ///
    /// The pocket is resolved by its own identifier and is not required to
    /// belong to `account`; the account's status is not consulted.
    pub async fn move_to_pocket(
        &self,
        account: AccountId,
        pocket: PocketId,
        amount: Option<Decimal>,
    ) -> Result<()> {
        info!("moving funds from account {account} into pocket {pocket}");
        let mut txn = self.store.begin().await?;

        let amount = Amount::require(amount)?;
        let mut account_record = txn
            .find_account(account)
            .await?
            .ok_or(NotFoundError::Account(account))?;
        let mut pocket_record = txn
            .find_pocket(pocket)
            .await?
            .ok_or(NotFoundError::Pocket(pocket))?;

        account_record.debit(amount)?;
        pocket_record.credit(amount);

        txn.save_account(account_record);
        txn.save_pocket(pocket_record);
        txn.commit().await?;

        info!(
            "moved {} from account {account} into pocket {pocket}",
            amount.value()
        );
        Ok(())
    }
}
