use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity minted for one processed crate.
///
/// A fresh UUID v4 per crate; the public URL prefix of its files and the
/// `arcp://` base used to resolve crate-relative identifiers are both
/// derived from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrateIdentity(Uuid);

impl CrateIdentity {
    /// Mint a new random identity.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }

    /// URL prefix under which the crate's files are published.
    ///
    /// Always ends with `/` so a file name can be appended directly.
    pub fn base_url(&self) -> String {
        format!("https://{}/", self.0)
    }

    /// `arcp://uuid,{id}/` resolution base for the crate's linked data.
    pub fn arcp_base(&self) -> String {
        format!("arcp://uuid,{}/", self.0)
    }

    /// Short identifier (first 8 hex characters).
    pub fn short_id(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl fmt::Display for CrateIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
