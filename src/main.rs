use brackets::validate_brackets;
use clap::Parser;
use compute::Bank;
use std::path::PathBuf;
use store::FileStore;
use tracing_subscriber::EnvFilter;

mod brackets;
mod cli;
mod compute;
mod data;
mod read;
mod session;
mod store;
mod write;

/// Terminal banking demo: open accounts, log in, move money around.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Account store, one `identifier,secret,category,balance` line per account
    #[arg(long, default_value = "accounts.txt")]
    store: PathBuf,

    /// Only check whether this string of brackets is well nested, then exit
    #[arg(long)]
    brackets: Option<String>,
}

fn main() -> Result<(), anyhow::Error> {
    // Logs go to stderr so they never get mixed with the prompts.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    if let Some(brackets) = args.brackets {
        let verdict = if validate_brackets(&brackets) {
            "valid"
        } else {
            "invalid"
        };
        println!("{verdict}");
        return Ok(());
    }

    let mut bank = Bank::open(FileStore::new(args.store))?;
    cli::run(&mut bank, std::io::stdin().lock(), std::io::stdout())?;
    Ok(())
}
