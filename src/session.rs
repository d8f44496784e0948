use crate::{
    compute::Bank,
    data::{AccountId, Error},
    store::AccountStore,
};

/// Who is at the terminal. There is no timeout and no lockout: a failed login
/// simply leaves the session logged out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum Session {
    #[default]
    LoggedOut,
    LoggedIn(AccountId),
}

impl Session {
    /// Both the account number and the password have to match exactly.
    pub fn login<S: AccountStore>(bank: &Bank<S>, id: &str, secret: &str) -> Result<Self, Error> {
        match bank.accounts.get(id) {
            Some(account) if account.secret == secret => {
                tracing::info!(%id, "logged in");
                Ok(Session::LoggedIn(account.id.clone()))
            }
            _ => {
                tracing::warn!(%id, "login refused");
                Err(Error::InvalidCredentials)
            }
        }
    }

    pub fn logout(self) -> Self {
        if let Session::LoggedIn(id) = &self {
            tracing::info!(%id, "logged out");
        }
        Session::LoggedOut
    }

    pub fn account(&self) -> Option<&str> {
        match self {
            Session::LoggedIn(id) => Some(id.as_str()),
            Session::LoggedOut => None,
        }
    }
}
