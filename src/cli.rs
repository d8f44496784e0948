use crate::{
    compute::Bank,
    data::{Category, Error, SIGNIFICANT_DIGITS},
    session::Session,
    store::AccountStore,
};
use rust_decimal::Decimal;
use std::{
    io::{BufRead, Write},
    str::FromStr,
};

const TOO_LARGE: &str = "Amount too large for this account.";

/// Line-based prompts over any reader/writer pair, so that whole sessions can be
/// replayed from a byte string in tests.
struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Shows `question` and returns the answer without its line ending, or `None`
    /// once input is exhausted.
    fn prompt(&mut self, question: &str) -> std::io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }

    fn say(&mut self, text: impl std::fmt::Display) -> std::io::Result<()> {
        writeln!(self.output, "{text}")
    }
}

/// Amounts are typed as decimal numbers (`12`, `12.5`, `1e3`). Anything else is
/// an error the session doesn't recover from.
pub(crate) fn parse_amount(text: &str) -> Result<Decimal, Error> {
    let text = text.trim();
    let mut amount = Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| Error::InvalidAmount(text.to_owned()))?;
    amount.rescale(SIGNIFICANT_DIGITS);
    Ok(amount)
}

/// Runs the top-level menu until the user picks "exit" or input runs out.
pub(crate) fn run<S, R, W>(bank: &mut Bank<S>, input: R, output: W) -> Result<(), anyhow::Error>
where
    S: AccountStore,
    R: BufRead,
    W: Write,
{
    let mut console = Console { input, output };
    loop {
        console.say("Welcome to the Banking Application!")?;
        console.say("1. Open a new account")?;
        console.say("2. Login to an existing account")?;
        console.say("3. Exit")?;
        let Some(choice) = console.prompt("Enter your choice (1-3): ")? else {
            return Ok(());
        };
        match choice.trim() {
            "1" => {
                let Some(kind) = console.prompt("Enter account type (Personal/Business): ")?
                else {
                    return Ok(());
                };
                let category = match Category::from_choice(&kind) {
                    Ok(category) => category,
                    Err(e) => {
                        tracing::warn!("{e}");
                        console.say("Invalid account type.")?;
                        continue;
                    }
                };
                let account = bank.open_account(category, Decimal::ZERO)?;
                console.say(format_args!("Your account number is: {}", account.id))?;
                console.say(format_args!("Your password is: {}", account.secret))?;
                console.say("Account created successfully.")?;
            }
            "2" => {
                let Some(id) = console.prompt("Enter your account number: ")? else {
                    return Ok(());
                };
                let Some(secret) = console.prompt("Enter your password: ")? else {
                    return Ok(());
                };
                match Session::login(bank, id.trim(), &secret) {
                    Ok(session) => {
                        if !account_menu(bank, &mut console, session)? {
                            return Ok(());
                        }
                    }
                    Err(_) => console.say("Invalid account number or password.")?,
                }
            }
            "3" => return Ok(()),
            _ => {}
        }
    }
}

/// Post-login menu. Returns `false` when input ran out before the user logged out.
fn account_menu<S, R, W>(
    bank: &mut Bank<S>,
    console: &mut Console<R, W>,
    session: Session,
) -> Result<bool, anyhow::Error>
where
    S: AccountStore,
    R: BufRead,
    W: Write,
{
    let Some(id) = session.account().map(str::to_owned) else {
        return Ok(true);
    };
    loop {
        let category = bank.account(&id)?.category;
        console.say(format_args!("Welcome, {category} account holder!"))?;
        console.say("1. Check balance")?;
        console.say("2. Deposit")?;
        console.say("3. Withdraw")?;
        console.say("4. Transfer to another account")?;
        console.say("5. Logout")?;
        let Some(choice) = console.prompt("Enter your choice (1-5): ")? else {
            return Ok(false);
        };
        match choice.trim() {
            "1" => {
                let balance = bank.balance(&id)?;
                console.say(format_args!("Your balance is: {}", balance.normalize()))?;
            }
            "2" => {
                let Some(text) = console.prompt("Enter the amount to deposit: ")? else {
                    return Ok(false);
                };
                match bank.deposit(&id, parse_amount(&text)?) {
                    Ok(()) => console.say("Deposit successful.")?,
                    Err(Error::Overflow) => console.say(TOO_LARGE)?,
                    Err(e) => return Err(e.into()),
                }
            }
            "3" => {
                let Some(text) = console.prompt("Enter the amount to withdraw: ")? else {
                    return Ok(false);
                };
                match bank.withdraw(&id, parse_amount(&text)?) {
                    Ok(()) => console.say("Withdrawal successful.")?,
                    Err(Error::InsufficientFunds { .. }) => console.say("Insufficient funds.")?,
                    Err(Error::Overflow) => console.say(TOO_LARGE)?,
                    Err(e) => return Err(e.into()),
                }
            }
            "4" => {
                let Some(to) = console.prompt("Enter recipient's account number: ")? else {
                    return Ok(false);
                };
                let to = to.trim();
                if bank.account(to).is_err() {
                    console.say("Recipient account not found.")?;
                    continue;
                }
                let Some(text) = console.prompt("Enter the amount to transfer: ")? else {
                    return Ok(false);
                };
                match bank.transfer(&id, to, parse_amount(&text)?) {
                    Ok(()) => console.say("Transfer successful.")?,
                    Err(Error::SameAccount) => {
                        console.say("Cannot transfer to the same account.")?
                    }
                    Err(Error::InsufficientFunds { .. }) => console.say("Insufficient funds.")?,
                    Err(Error::Overflow) => console.say(TOO_LARGE)?,
                    Err(e) => return Err(e.into()),
                }
            }
            "5" => {
                session.logout();
                console.say("Logged out successfully.")?;
                return Ok(true);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_amount, run};
    use crate::{
        compute::Bank,
        data::{Category, Error},
        store::MemoryStore,
    };
    use rust_decimal_macros::dec;

    const STORE: &str = "\
1111111111,aaaaAAA1,Personal,100
2222222222,bbbbBBB2,Business,0
";

    fn session(bank: &mut Bank<MemoryStore>, script: &str) -> (Result<(), anyhow::Error>, String) {
        let mut out = Vec::new();
        let result = run(bank, script.as_bytes(), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn amounts() {
        assert_eq!(parse_amount("50"), Ok(dec!(50)));
        assert_eq!(parse_amount(" 12.5 "), Ok(dec!(12.5)));
        assert_eq!(parse_amount("1e3"), Ok(dec!(1000)));
        assert_eq!(parse_amount("-3"), Ok(dec!(-3)));
        assert_eq!(
            parse_amount("ten"),
            Err(Error::InvalidAmount("ten".to_owned()))
        );
    }

    #[test]
    fn open_account() {
        let mut bank = Bank::open(MemoryStore::default()).unwrap();
        let (result, out) = session(&mut bank, "1\npersonal\n3\n");
        result.unwrap();
        assert!(out.contains("Account created successfully."));
        assert_eq!(bank.accounts.len(), 1);
        let account = bank.accounts.values().next().unwrap();
        assert_eq!(account.category, Category::Personal);
        assert!(out.contains(&format!("Your account number is: {}", account.id)));
        assert!(out.contains(&format!("Your password is: {}", account.secret)));
    }

    #[test]
    fn invalid_account_type_goes_back_to_menu() {
        let mut bank = Bank::open(MemoryStore::default()).unwrap();
        let (result, out) = session(&mut bank, "1\nsavings\n3\n");
        result.unwrap();
        assert!(out.contains("Invalid account type."));
        assert_eq!(out.matches("Welcome to the Banking Application!").count(), 2);
        assert!(bank.accounts.is_empty());
    }

    #[test]
    fn bad_login() {
        let mut bank = Bank::open(MemoryStore::with_lines(STORE)).unwrap();
        let (result, out) = session(&mut bank, "2\n1111111111\nwrong\n3\n");
        result.unwrap();
        assert!(out.contains("Invalid account number or password."));
        assert!(!out.contains("account holder"));
    }

    #[test]
    fn scripted_scenario() {
        let mut bank = Bank::open(MemoryStore::with_lines(STORE)).unwrap();
        let script = "\
2
1111111111
aaaaAAA1
2
50
1
3
200
1
4
2222222222
150
1
5
3
";
        let (result, out) = session(&mut bank, script);
        result.unwrap();
        assert!(out.contains("Welcome, Personal account holder!"));
        assert!(out.contains("Your balance is: 150\n"));
        assert!(out.contains("Insufficient funds."));
        assert!(out.contains("Transfer successful."));
        assert!(out.contains("Your balance is: 0\n"));
        assert!(out.contains("Logged out successfully."));
        assert_eq!(bank.balance("1111111111"), Ok(dec!(0)));
        assert_eq!(bank.balance("2222222222"), Ok(dec!(150)));
    }

    #[test]
    fn transfer_refusals() {
        let mut bank = Bank::open(MemoryStore::with_lines(STORE)).unwrap();
        let script = "\
2
1111111111
aaaaAAA1
4
9999999999
4
1111111111
10
4
2222222222
500
5
3
";
        let (result, out) = session(&mut bank, script);
        result.unwrap();
        assert!(out.contains("Recipient account not found."));
        assert!(out.contains("Cannot transfer to the same account."));
        assert!(out.contains("Insufficient funds."));
        assert!(!out.contains("Transfer successful."));
        assert_eq!(bank.balance("1111111111"), Ok(dec!(100)));
        assert_eq!(bank.balance("2222222222"), Ok(dec!(0)));
    }

    #[test]
    fn invalid_amount_ends_the_run() {
        let mut bank = Bank::open(MemoryStore::with_lines(STORE)).unwrap();
        let (result, _) = session(&mut bank, "2\n1111111111\naaaaAAA1\n2\nlots\n5\n3\n");
        let err = result.unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::InvalidAmount("lots".to_owned()))
        );
        assert_eq!(bank.balance("1111111111"), Ok(dec!(100)));
    }

    #[test]
    fn end_of_input_exits() {
        let mut bank = Bank::open(MemoryStore::with_lines(STORE)).unwrap();
        let (result, _) = session(&mut bank, "2\n1111111111\naaaaAAA1\n2\n");
        result.unwrap();
        let (result, _) = session(&mut bank, "");
        result.unwrap();
    }

    #[test]
    fn huge_deposit_is_refused() {
        let mut bank = Bank::open(MemoryStore::with_lines(STORE)).unwrap();
        let script = "\
2
1111111111
aaaaAAA1
2
79228162514264337593543950335
1
5
3
";
        let (result, out) = session(&mut bank, script);
        result.unwrap();
        assert!(out.contains("Amount too large for this account."));
        assert!(!out.contains("Deposit successful."));
        assert!(out.contains("Your balance is: 100\n"));
        assert_eq!(bank.balance("1111111111"), Ok(dec!(100)));
    }
}
