use rand::{distributions::Alphanumeric, Rng};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub type AccountId = String;

pub const SIGNIFICANT_DIGITS: u32 = 4;
pub const ID_LEN: usize = 10;
pub const SECRET_LEN: usize = 8;

/// The kind of account a customer opened. Only the name ends up in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Category {
    Personal,
    Business,
}

impl Category {
    /// Parses what the user typed at the "account type" prompt; case doesn't matter
    /// but anything besides the two known names is refused.
    pub fn from_choice(choice: &str) -> Result<Self, Error> {
        match choice.trim().to_lowercase().as_str() {
            "personal" => Ok(Category::Personal),
            "business" => Ok(Category::Business),
            _ => Err(Error::UnknownCategory(choice.trim().to_owned())),
        }
    }

    /// Parses a category read back from the store. Only an exact `Personal` is
    /// personal, every other string is taken as a business account.
    pub fn from_stored(name: &str) -> Self {
        if name == "Personal" {
            Category::Personal
        } else {
            Category::Business
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Personal => "Personal",
            Category::Business => "Business",
        })
    }
}

/// A customer account. `id` and `secret` are drawn once in `generate` and are
/// never touched afterwards; only `balance` moves.
///
/// On disk an account is one `AccountRecord` line, see there for what is lost on
/// the way back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "AccountRecord", from = "AccountRecord")]
pub(crate) struct Account {
    pub id: AccountId,
    pub secret: String,
    pub category: Category,
    pub balance: Decimal,
}

impl Account {
    pub fn generate<R: Rng>(category: Category, balance: Decimal, rng: &mut R) -> Self {
        Self {
            id: generate_id(rng),
            secret: generate_secret(rng),
            category,
            balance,
        }
    }
}

/// Ten random decimal digits. Nothing here prevents two accounts from drawing the
/// same number; `Bank::open_account` checks against the accounts it knows about.
pub(crate) fn generate_id<R: Rng>(rng: &mut R) -> AccountId {
    (0..ID_LEN)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

pub(crate) fn generate_secret<R: Rng>(rng: &mut R) -> String {
    (0..SECRET_LEN)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

/// Proxy for the on-disk line `identifier,secret,category,balance`.
/// Reading it back is lossy on purpose: the category goes through
/// `Category::from_stored` and the balance is truncated to a whole number.
#[derive(Serialize, Deserialize)]
pub(crate) struct AccountRecord {
    pub id: AccountId,
    pub secret: String,
    pub category: String,
    pub balance: Decimal,
}

impl From<Account> for AccountRecord {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            secret: account.secret,
            category: account.category.to_string(),
            balance: account.balance,
        }
    }
}

impl From<AccountRecord> for Account {
    fn from(record: AccountRecord) -> Self {
        Self {
            id: record.id,
            secret: record.secret,
            category: Category::from_stored(&record.category),
            balance: record.balance.trunc(),
        }
    }
}

/// Errors of the ledger itself. I/O and parsing of the store go through `anyhow`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Insufficient funds: {requested} requested but the balance is {balance}")]
    InsufficientFunds { requested: Decimal, balance: Decimal },
    #[error("Balance would overflow")]
    Overflow,
    #[error("Account {0} not found")]
    AccountNotFound(AccountId),
    #[error("Cannot transfer to the same account")]
    SameAccount,
    #[error("Invalid account number or password")]
    InvalidCredentials,
    #[error("Unknown account type {0:?}")]
    UnknownCategory(String),
    #[error("Invalid amount {0:?}")]
    InvalidAmount(String),
}
