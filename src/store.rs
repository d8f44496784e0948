use crate::{
    data::{Account, AccountId, Category},
    read::read_accounts,
    write::write_account,
};
use rust_decimal::Decimal;
use std::{
    collections::HashMap,
    fs::{File, OpenOptions},
    io::ErrorKind,
    path::PathBuf,
};

/// Where accounts live between two runs. The store only ever learns about new
/// accounts: balance changes made after `persist` are not written back.
pub(crate) trait AccountStore {
    fn persist(&mut self, account: &Account) -> Result<(), anyhow::Error>;
    fn load_all(&self) -> Result<HashMap<AccountId, Account>, anyhow::Error>;

    /// Draws a fresh account; it isn't stored until `persist` is called.
    fn create(&self, category: Category, balance: Decimal) -> Account {
        Account::generate(category, balance, &mut rand::thread_rng())
    }
}

/// Flat text file, appended to and never rewritten. No locking: two runs
/// appending at the same time can interleave their lines.
#[derive(Debug)]
pub(crate) struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AccountStore for FileStore {
    fn persist(&mut self, account: &Account) -> Result<(), anyhow::Error> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        write_account(file, account)
    }

    fn load_all(&self) -> Result<HashMap<AccountId, Account>, anyhow::Error> {
        match File::open(&self.path) {
            Ok(file) => read_accounts(file),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no account store yet");
                Ok(HashMap::new())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory stand-in for `FileStore`, holding the very same lines.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    pub lines: Vec<u8>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_lines(lines: &str) -> Self {
        Self {
            lines: lines.as_bytes().to_vec(),
        }
    }
}

#[cfg(test)]
impl AccountStore for MemoryStore {
    fn persist(&mut self, account: &Account) -> Result<(), anyhow::Error> {
        write_account(&mut self.lines, account)
    }

    fn load_all(&self) -> Result<HashMap<AccountId, Account>, anyhow::Error> {
        read_accounts(&self.lines[..])
    }
}
