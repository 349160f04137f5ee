// ── MAC address identity type ──
//
// The MAC address is the primary collapse key for device records, so it
// must normalize consistently no matter how the backend or an operator
// writes it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// MAC address, normalized to lowercase colon-separated format
/// (aa:bb:cc:dd:ee:ff).
///
/// Accepts colon-, dash-, or underscore-separated input and strips
/// whitespace — operators paste MACs with underscores into the command
/// form, and the backend is inconsistent about case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MacAddress(String);

impl MacAddress {
    /// Create a normalized MAC address from any common format.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let normalized: String = raw
            .as_ref()
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                '-' | '_' => ':',
                other => other.to_ascii_lowercase(),
            })
            .collect();
        Self(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MacAddress {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}
