use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(String);

impl CandidateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One item in the decision queue. Immutable once loaded into a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub payload: String,
    pub weight: u32,
}

impl Candidate {
    pub fn new(id: impl Into<String>, payload: impl Into<String>, weight: u32) -> Self {
        Self {
            id: CandidateId::new(id),
            payload: payload.into(),
            weight,
        }
    }
}
