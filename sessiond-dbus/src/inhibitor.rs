//! Model for sessiond inhibitors

use std::fmt;

/// Opaque identifier the daemon hands out for an inhibitor.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct InhibitorId(String);

impl InhibitorId {
    pub fn new(s: String) -> InhibitorId {
        InhibitorId(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InhibitorId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InhibitorId {
    fn from(s: &str) -> InhibitorId {
        InhibitorId(s.to_string())
    }
}

/// A running inhibitor, as listed by the daemon.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Inhibitor {
    /// Creation timestamp, as reported by the daemon
    pub created_at: u64,
    /// Who is inhibiting
    pub who: String,
    /// Why the inhibitor is running
    pub why: String,
}

impl From<(u64, String, String)> for Inhibitor {
    fn from((created_at, who, why): (u64, String, String)) -> Inhibitor {
        Inhibitor {
            created_at,
            who,
            why,
        }
    }
}
