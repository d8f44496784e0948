use crate::data::{Account, AccountId};
use std::collections::HashMap;

const FIELDS: usize = 4;

/// Simple importer for the account store: one `identifier,secret,category,balance`
/// line per account, no header. Fields are taken as written, spaces included.
/// A blank line, or a line without exactly these four fields, aborts the whole load.
pub(crate) fn read_accounts<R: std::io::Read>(
    mut reader: R,
) -> Result<HashMap<AccountId, Account>, anyhow::Error> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    // The CSV reader skips empty lines on its own, so catch them here.
    if let Some(n) = text.lines().position(str::is_empty) {
        anyhow::bail!("account store line {}: empty line", n + 1);
    }
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut accounts = HashMap::new();
    for result in rdr.records() {
        let record = result?;
        if record.len() != FIELDS {
            let line = record.position().map_or(0, |pos| pos.line());
            anyhow::bail!(
                "account store line {line}: expected {FIELDS} fields, found {}",
                record.len()
            );
        }
        let account: Account = record.deserialize(None)?;
        // Later lines win, like they would when filling a map line by line.
        accounts.insert(account.id.clone(), account);
    }
    Ok(accounts)
}
