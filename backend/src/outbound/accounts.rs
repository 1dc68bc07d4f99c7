//! Login service backed by a configured account list.
//!
//! Accounts come from a JSON file of `{ "id", "username", "password" }`
//! objects. There is no signup; the list is fixed for the life of the process.

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::ports::LoginService;
use crate::domain::{Error, LoginCredentials, UserId};

/// One configured account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    /// Stable user identifier recorded as the author of notes and comments.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Plain-text password.
    pub password: String,
}

/// Errors raised while loading the account list.
#[derive(Debug, thiserror::Error)]
pub enum AccountsError {
    /// The accounts file could not be read.
    #[error("failed to read accounts file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The accounts file is not a JSON list of accounts.
    #[error("failed to parse accounts file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// Two accounts share a username.
    #[error("duplicate username in accounts file: {username}")]
    DuplicateUsername { username: String },
}

/// [`LoginService`] checking credentials against a fixed account list.
#[derive(Debug, Clone, Default)]
pub struct AccountsLoginService {
    accounts: Vec<Account>,
}

impl AccountsLoginService {
    /// Build the service from accounts already in memory.
    ///
    /// # Errors
    /// Returns [`AccountsError::DuplicateUsername`] when a username repeats.
    pub fn new(accounts: Vec<Account>) -> Result<Self, AccountsError> {
        for (index, account) in accounts.iter().enumerate() {
            if accounts[..index]
                .iter()
                .any(|earlier| earlier.username == account.username)
            {
                return Err(AccountsError::DuplicateUsername {
                    username: account.username.clone(),
                });
            }
        }
        Ok(Self { accounts })
    }

    /// Load accounts from a JSON file.
    ///
    /// # Errors
    /// Fails when the file is unreadable, malformed, or repeats a username.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, AccountsError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| AccountsError::Read {
            path: shown.clone(),
            source,
        })?;
        let accounts: Vec<Account> =
            serde_json::from_str(&raw).map_err(|source| AccountsError::Parse {
                path: shown.clone(),
                source,
            })?;
        info!(path = %shown, count = accounts.len(), "loaded accounts");
        Self::new(accounts)
    }

    /// Number of configured accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether no account is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl LoginService for AccountsLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        self.accounts
            .iter()
            .find(|account| {
                account.username == credentials.username()
                    && account.password == credentials.password()
            })
            .map(|account| account.id.clone())
            .ok_or_else(|| {
                debug!(username = credentials.username(), "login rejected");
                Error::unauthorized("invalid credentials")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::{fixture, rstest};

    const ALICE: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[fixture]
    fn service() -> AccountsLoginService {
        AccountsLoginService::new(vec![Account {
            id: UserId::new(ALICE).expect("fixture id"),
            username: "alice".to_owned(),
            password: "wonderland".to_owned(),
        }])
        .expect("unique usernames")
    }

    fn credentials(username: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(username, password).expect("non-empty credentials")
    }

    #[rstest]
    #[tokio::test]
    async fn matching_credentials_yield_the_account_id(service: AccountsLoginService) {
        let id = service
            .authenticate(&credentials("alice", "wonderland"))
            .await
            .expect("authenticated");
        assert_eq!(id.to_string(), ALICE);
    }

    #[rstest]
    #[case("alice", "looking-glass")]
    #[case("bob", "wonderland")]
    #[tokio::test]
    async fn mismatched_credentials_are_unauthorised(
        service: AccountsLoginService,
        #[case] username: &str,
        #[case] password: &str,
    ) {
        let err = service
            .authenticate(&credentials(username, password))
            .await
            .expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    fn parses_the_json_account_list() {
        let accounts: Vec<Account> = serde_json::from_str(&format!(
            r#"[{{"id": "{ALICE}", "username": "alice", "password": "wonderland"}}]"#
        ))
        .expect("valid json");
        assert_eq!(accounts[0].username, "alice");
    }

    #[rstest]
    fn duplicate_usernames_are_refused() {
        let account = Account {
            id: UserId::random(),
            username: "twin".to_owned(),
            password: "x".to_owned(),
        };
        let err = AccountsLoginService::new(vec![account.clone(), account]).expect_err("dup");
        assert!(matches!(err, AccountsError::DuplicateUsername { .. }));
    }

    #[rstest]
    fn missing_file_reports_its_path() {
        let err = AccountsLoginService::from_json_file("/nonexistent/accounts.json")
            .expect_err("missing");
        assert!(err.to_string().contains("/nonexistent/accounts.json"));
    }
}
