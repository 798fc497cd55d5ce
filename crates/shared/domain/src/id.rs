//! Configuration version identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Length of the canonical hyphenated form (`8-4-4-4-12`).
const CANONICAL_LEN: usize = 36;

/// Rejected version identifier token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigIdError {
    #[error("Configuration id is empty")]
    Empty,
    #[error("Configuration id '{token}' is not a canonical UUID ({reason})")]
    Malformed { token: String, reason: String },
}

/// Opaque name of one immutable service specification snapshot.
///
/// Only the canonical hyphenated UUID form is accepted when parsing, so the
/// simple, braced and URN spellings of the same value are rejected:
///
/// ```rust
/// use spechub_domain::id::ConfigId;
///
/// let id: ConfigId = "67e55044-10b1-426f-9247-bb680e5fe0c8".parse().unwrap();
/// assert_eq!(id.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
///
/// assert!("67e5504410b1426f9247bb680e5fe0c8".parse::<ConfigId>().is_err());
/// assert!("not-a-uuid".parse::<ConfigId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigId(Uuid);

impl ConfigId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a token, accepting only the canonical hyphenated form.
    ///
    /// # Errors
    /// Returns [`ConfigIdError::Empty`] for an empty token and
    /// [`ConfigIdError::Malformed`] for anything else that is not canonical.
    pub fn parse(token: &str) -> Result<Self, ConfigIdError> {
        if token.is_empty() {
            return Err(ConfigIdError::Empty);
        }
        if token.len() != CANONICAL_LEN {
            return Err(ConfigIdError::Malformed {
                token: token.to_owned(),
                reason: format!("expected {CANONICAL_LEN} characters, got {}", token.len()),
            });
        }
        Uuid::try_parse(token).map(Self).map_err(|e| ConfigIdError::Malformed {
            token: token.to_owned(),
            reason: e.to_string(),
        })
    }
}

impl FromStr for ConfigId {
    type Err = ConfigIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ConfigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}
