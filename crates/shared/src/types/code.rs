//! Human-readable project codes.
//!
//! Every project carries a short code (`PRJ-1234`) alongside its UUID
//! primary key. The code is what appears on invoices and site paperwork.

use serde::{Deserialize, Serialize};

/// Prefix for all project codes.
pub const PROJECT_CODE_PREFIX: &str = "PRJ-";

/// Number of digits in the random suffix.
pub const PROJECT_CODE_DIGITS: usize = 4;

/// A validated human-readable project code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectCode(String);

impl ProjectCode {
    /// Builds a code from a numeric suffix, zero-padded to four digits.
    #[must_use]
    pub fn from_suffix(suffix: u16) -> Self {
        Self(format!("{PROJECT_CODE_PREFIX}{:04}", suffix % 10_000))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the code, returning the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ProjectCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProjectCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let suffix = s
            .strip_prefix(PROJECT_CODE_PREFIX)
            .ok_or_else(|| format!("Project code must start with {PROJECT_CODE_PREFIX}"))?;

        if suffix.len() != PROJECT_CODE_DIGITS || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!(
                "Project code suffix must be {PROJECT_CODE_DIGITS} digits"
            ));
        }

        Ok(Self(s.to_string()))
    }
}
