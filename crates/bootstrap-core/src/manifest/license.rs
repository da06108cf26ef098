//! Known licenses and their template metadata

use std::fmt;

/// A license the project can be published under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum License {
    #[default]
    None,
    Mit,
    Apache2,
    GplV3,
    AgplV3,
}

impl License {
    /// Every entry, in the order offered to the user
    pub const ALL: [License; 5] = [
        License::None,
        License::Mit,
        License::Apache2,
        License::GplV3,
        License::AgplV3,
    ];

    /// Look up a license by its exact command-line key. Unknown keys map to `None`.
    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|license| license.key() == key)
            .unwrap_or(License::None)
    }

    /// Whether `key` names a known license (including `None`)
    pub fn is_known_key(key: &str) -> bool {
        Self::ALL
            .iter()
            .any(|license| license.key() == key)
    }

    pub fn key(&self) -> &'static str {
        match self {
            License::None => "None",
            License::Mit => "MIT",
            License::Apache2 => "Apache-2.0",
            License::GplV3 => "GPLv3",
            License::AgplV3 => "AGPLv3",
        }
    }

    /// File name of the license text under `licenses/` in the template repository
    pub fn license_file(&self) -> Option<&'static str> {
        match self {
            License::None => None,
            License::Mit => Some("MIT.txt"),
            License::Apache2 => Some("Apache-2.0.txt"),
            License::GplV3 => Some("GPLv3.txt"),
            License::AgplV3 => Some("AGPLv3.txt"),
        }
    }

    pub fn spdx_id(&self) -> Option<&'static str> {
        match self {
            License::None => None,
            License::Mit => Some("MIT"),
            License::Apache2 => Some("Apache-2.0"),
            License::GplV3 => Some("GPL-3.0-or-later"),
            License::AgplV3 => Some("AGPL-3.0-or-later"),
        }
    }

    pub fn is_selected(&self) -> bool {
        !matches!(self, License::None)
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
