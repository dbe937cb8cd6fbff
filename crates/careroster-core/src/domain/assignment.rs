use std::fmt;

use serde::{Deserialize, Serialize};

/// A (visit, caregiver) pairing produced by a solver or supplied externally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Assignment {
    pub visit_id: String,
    pub caregiver_id: String,
}

impl Assignment {
    pub fn new(visit_id: impl Into<String>, caregiver_id: impl Into<String>) -> Self {
        Self {
            visit_id: visit_id.into(),
            caregiver_id: caregiver_id.into(),
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.visit_id, self.caregiver_id)
    }
}
