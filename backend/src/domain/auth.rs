//! Authentication primitives: the request principal and login credentials.
//!
//! Inbound adapters resolve a [`Principal`] for every request and hand it to
//! domain services, which consult the ownership policy before touching any
//! entity.

use zeroize::Zeroizing;

use super::UserId;

/// Identity attached to a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// No authenticated session.
    Anonymous,
    /// A logged-in user.
    Authenticated(UserId),
}

impl Principal {
    /// The authenticated user id, if any.
    #[must_use]
    pub const fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(id) => Some(id),
        }
    }

    /// Whether the principal carries an authenticated identity.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

impl From<Option<UserId>> for Principal {
    fn from(value: Option<UserId>) -> Self {
        value.map_or(Self::Anonymous, Self::Authenticated)
    }
}

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use noticeboard::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" author ", "secret").expect("valid");
/// assert_eq!(creds.username(), "author");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    ///
    /// # Errors
    /// Returns [`LoginValidationError`] when either part is blank.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for account lookups.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn password_whitespace_is_preserved() {
        let creds = LoginCredentials::try_from_parts("reader", " pass ").expect("valid");
        assert_eq!(creds.password(), " pass ");
    }

    #[rstest]
    fn principal_from_optional_id() {
        assert_eq!(Principal::from(None), Principal::Anonymous);
        let id = UserId::random();
        let principal = Principal::from(Some(id.clone()));
        assert!(principal.is_authenticated());
        assert_eq!(principal.user_id(), Some(&id));
    }
}
