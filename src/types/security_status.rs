// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Home security status reported in the metrics snapshot.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Overall security status of the home.
///
/// # Examples
///
/// ```
/// use homedeck::types::SecurityStatus;
///
/// let status: SecurityStatus = "warning".parse().unwrap();
/// assert_eq!(status, SecurityStatus::Warning);
/// assert!(!status.is_secured());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityStatus {
    /// All entry points are locked and no alarm is raised.
    #[default]
    Secured,
    /// An intrusion was detected.
    Breached,
    /// Something needs attention, such as an unlocked door.
    Warning,
}

impl SecurityStatus {
    /// Returns the lowercase name used in serialized form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Secured => "secured",
            Self::Breached => "breached",
            Self::Warning => "warning",
        }
    }

    /// Returns `true` if the status is [`SecurityStatus::Secured`].
    #[must_use]
    pub const fn is_secured(&self) -> bool {
        matches!(self, Self::Secured)
    }
}

impl fmt::Display for SecurityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecurityStatus {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "secured" => Ok(Self::Secured),
            "breached" => Ok(Self::Breached),
            "warning" => Ok(Self::Warning),
            _ => Err(ValueError::InvalidSecurityStatus(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_secured() {
        assert_eq!(SecurityStatus::default(), SecurityStatus::Secured);
        assert!(SecurityStatus::default().is_secured());
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!(
            "Breached".parse::<SecurityStatus>().unwrap(),
            SecurityStatus::Breached
        );
        assert_eq!(
            "open".parse::<SecurityStatus>(),
            Err(ValueError::InvalidSecurityStatus("open".to_string()))
        );
    }

    #[test]
    fn serde_uses_lowercase() {
        let json = serde_json::to_string(&SecurityStatus::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
        let back: SecurityStatus = serde_json::from_str("\"breached\"").unwrap();
        assert_eq!(back, SecurityStatus::Breached);
    }
}
