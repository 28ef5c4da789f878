use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Opaque identifier for a subtitle cue.
///
/// Assigned once at creation and never reused; every other cue field is
/// mutable through an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CueId(uuid::Uuid);

impl CueId {
    pub fn generate() -> CueId {
        CueId(uuid::Uuid::new_v4())
    }
}

impl FromStr for CueId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CueId(uuid::Uuid::from_str(s)?))
    }
}

impl fmt::Display for CueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
