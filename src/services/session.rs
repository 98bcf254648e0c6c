//! Signed-in user
//!
//! Stands in for an auth provider: the session either holds a user id or is
//! signed out. Every persistence call goes through [`Session::require_user`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};

/// Identifier of a user; safe to use as a directory name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub fn parse(raw: &str) -> FinanceResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FinanceError::Validation("User id cannot be empty".into()));
        }
        if trimmed.starts_with('.') {
            return Err(FinanceError::Validation(format!(
                "User id cannot start with '.': {}",
                trimmed
            )));
        }
        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')))
        {
            return Err(FinanceError::Validation(format!(
                "User id contains invalid character '{}'",
                bad
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UserId {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for UserId {
    type Error = FinanceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<UserId>,
}

impl Session {
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn signed_in(user: UserId) -> Self {
        Self { user: Some(user) }
    }

    pub fn sign_in(&mut self, user: UserId) {
        tracing::debug!(user = %user, "signed in");
        self.user = Some(user);
    }

    pub fn sign_out(&mut self) {
        self.user = None;
    }

    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// The signed-in user, or `Unauthenticated`
    pub fn require_user(&self) -> FinanceResult<&UserId> {
        self.user.as_ref().ok_or(FinanceError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_ids() {
        assert_eq!(UserId::parse("alice").unwrap().as_str(), "alice");
        assert_eq!(UserId::parse(" bob_1.x-y ").unwrap().as_str(), "bob_1.x-y");
    }

    #[test]
    fn test_invalid_user_ids() {
        assert!(UserId::parse("").is_err());
        assert!(UserId::parse("   ").is_err());
        assert!(UserId::parse("../etc").is_err());
        assert!(UserId::parse("a/b").is_err());
        assert!(UserId::parse("..").is_err());
    }

    #[test]
    fn test_require_user() {
        let mut session = Session::signed_out();
        assert!(matches!(session.require_user(), Err(FinanceError::Unauthenticated)));

        session.sign_in(UserId::parse("alice").unwrap());
        assert_eq!(session.require_user().unwrap().as_str(), "alice");

        session.sign_out();
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_serde_validates() {
        let id: UserId = serde_json::from_str("\"carol\"").unwrap();
        assert_eq!(id.as_str(), "carol");
        assert!(serde_json::from_str::<UserId>("\"a b\"").is_err());
    }
}
