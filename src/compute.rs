use crate::{
    data::{Account, AccountId, Category, Error},
    store::AccountStore,
};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Ledger operations on a single account. None of them look at the sign of the
/// amount: a negative deposit takes money out, a negative withdrawal puts some in.
/// A result that doesn't fit in a `Decimal` is refused with the balance untouched.
impl Account {
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), Error> {
        self.balance = self.balance.checked_add(amount).ok_or(Error::Overflow)?;
        Ok(())
    }

    /// Refused, with the balance left alone, when it would go below zero.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), Error> {
        if self.balance < amount {
            return Err(Error::InsufficientFunds {
                requested: amount,
                balance: self.balance,
            });
        }
        self.balance = self.balance.checked_sub(amount).ok_or(Error::Overflow)?;
        Ok(())
    }

    pub fn check_balance(&self) -> Decimal {
        self.balance
    }
}

/// This is where accounts are kept while the program runs: everything the store
/// had at startup plus what was opened since. Single user, single thread, so no
/// protections for MT.
#[derive(Debug)]
pub(crate) struct Bank<S> {
    pub accounts: HashMap<AccountId, Account>,
    store: S,
}

impl<S: AccountStore> Bank<S> {
    pub fn open(store: S) -> Result<Self, anyhow::Error> {
        let accounts = store.load_all()?;
        tracing::debug!(accounts = accounts.len(), "account store loaded");
        Ok(Self { accounts, store })
    }

    /// Creates, persists and registers a new account. A new account is drawn
    /// from the store as long as its number clashes with a known one; secrets
    /// may repeat.
    pub fn open_account(
        &mut self,
        category: Category,
        balance: Decimal,
    ) -> Result<&Account, anyhow::Error> {
        let mut account = self.store.create(category, balance);
        while self.accounts.contains_key(&account.id) {
            tracing::debug!(id = %account.id, "account number already taken, drawing again");
            account = self.store.create(category, balance);
        }
        self.store.persist(&account)?;
        tracing::info!(id = %account.id, %category, "account opened");
        let id = account.id.clone();
        Ok(&*self.accounts.entry(id).or_insert(account))
    }

    pub fn account(&self, id: &str) -> Result<&Account, Error> {
        self.accounts
            .get(id)
            .ok_or_else(|| Error::AccountNotFound(id.to_owned()))
    }

    fn account_mut(&mut self, id: &str) -> Result<&mut Account, Error> {
        self.accounts
            .get_mut(id)
            .ok_or_else(|| Error::AccountNotFound(id.to_owned()))
    }

    pub fn balance(&self, id: &str) -> Result<Decimal, Error> {
        Ok(self.account(id)?.check_balance())
    }

    pub fn deposit(&mut self, id: &str, amount: Decimal) -> Result<(), Error> {
        self.account_mut(id)?.deposit(amount).map_err(|e| {
            tracing::warn!(%id, %amount, "deposit refused: {e}");
            e
        })
    }

    pub fn withdraw(&mut self, id: &str, amount: Decimal) -> Result<(), Error> {
        self.account_mut(id)?.withdraw(amount).map_err(|e| {
            tracing::warn!(%id, %amount, "withdrawal refused: {e}");
            e
        })
    }

    /// Moves `amount` from one account to another. The destination is only
    /// credited once the source has actually been debited, so a transfer the
    /// source can't cover, or the destination can't hold, changes nothing.
    pub fn transfer(&mut self, from: &str, to: &str, amount: Decimal) -> Result<(), Error> {
        if from == to {
            return Err(Error::SameAccount);
        }
        let mut credited = self.account(to)?.clone();
        credited.deposit(amount)?;
        self.withdraw(from, amount)?;
        *self.account_mut(to)? = credited;
        tracing::info!(%from, %to, %amount, "transfer done");
        Ok(())
    }
}
