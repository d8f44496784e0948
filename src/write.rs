use crate::data::Account;

/// Basic exporter for one `Account`, written as a single headerless line.
pub(crate) fn write_account<W: std::io::Write>(
    writer: W,
    account: &Account,
) -> Result<(), anyhow::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.serialize(account)?;
    wtr.flush()?;
    Ok(())
}
