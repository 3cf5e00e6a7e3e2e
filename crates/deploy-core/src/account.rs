use crate::error::{DeployError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

pub const MIN_ACCOUNT_ID_LEN: usize = 2;
pub const MAX_ACCOUNT_ID_LEN: usize = 64;

static ACCOUNT_RE: OnceLock<Regex> = OnceLock::new();

// Parts of lowercase alphanumerics joined by single `-` or `_`, and those
// joined by single `.`. Separators never lead, trail, or repeat.
fn account_re() -> &'static Regex {
    ACCOUNT_RE.get_or_init(|| {
        Regex::new(r"^(([a-z\d]+[\-_])*[a-z\d]+\.)*([a-z\d]+[\-_])*[a-z\d]+$").unwrap()
    })
}

pub fn validate_account_id(id: &str) -> Result<()> {
    if id.len() < MIN_ACCOUNT_ID_LEN || id.len() > MAX_ACCOUNT_ID_LEN || !account_re().is_match(id)
    {
        return Err(DeployError::InvalidAccountId(id.to_string()));
    }
    Ok(())
}

/// Destination account of a deployment, e.g. `room2.ostolex.testnet`.
///
/// Deserialization does not validate so that a bad value in the config file
/// is reported by `DeployConfig::validate` instead of failing the load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn parse(id: &str) -> Result<Self> {
        validate_account_id(id)?;
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_valid(&self) -> bool {
        validate_account_id(&self.0).is_ok()
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_testnet_subaccounts() {
        for id in ["room2.ostolex.testnet", "ostolex.testnet", "a-b_c.near", "ab", "0x1"] {
            assert!(validate_account_id(id).is_ok(), "{id} should be valid");
        }
    }

    #[test]
    fn rejects_bad_separators() {
        for id in [".room.testnet", "room.testnet.", "room..testnet", "room--x", "-room", "room_"] {
            assert!(validate_account_id(id).is_err(), "{id} should be invalid");
        }
    }

    #[test]
    fn rejects_uppercase_and_symbols() {
        assert!(validate_account_id("Room.testnet").is_err());
        assert!(validate_account_id("room@testnet").is_err());
        assert!(validate_account_id("room testnet").is_err());
    }

    #[test]
    fn enforces_length_bounds() {
        assert!(validate_account_id("a").is_err());
        assert!(validate_account_id("").is_err());
        let long = "a".repeat(MAX_ACCOUNT_ID_LEN);
        assert!(validate_account_id(&long).is_ok());
        let too_long = "a".repeat(MAX_ACCOUNT_ID_LEN + 1);
        assert!(validate_account_id(&too_long).is_err());
    }

    #[test]
    fn parse_reports_offending_value() {
        let err = AccountId::parse("Bad.Account").unwrap_err();
        assert!(err.to_string().contains("Bad.Account"));
    }

    #[test]
    fn unvalidated_conversion_can_be_checked_later() {
        let id = AccountId::from("not valid");
        assert!(!id.is_valid());
        assert_eq!(id.as_str(), "not valid");
    }
}
