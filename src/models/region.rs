//! County identifiers.

use serde::{Deserialize, Serialize};

/// Number of characters in a county GEOID (2 state + 3 county digits).
pub const GEOID_LEN: usize = 5;

/// A validated 5-digit county FIPS GEOID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegionId(String);

impl RegionId {
    /// Parse a GEOID, rejecting anything that is not exactly 5 ASCII digits.
    /// Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.len() == GEOID_LEN && raw.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// State FIPS code (first 2 digits)
    pub fn state_fips(&self) -> &str {
        &self.0[..2]
    }

    /// County FIPS code within the state (last 3 digits)
    pub fn county_fips(&self) -> &str {
        &self.0[2..]
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RegionId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RegionId::parse(&value).ok_or_else(|| format!("invalid county GEOID: {:?}", value))
    }
}

impl From<RegionId> for String {
    fn from(id: RegionId) -> Self {
        id.0
    }
}
