use crate::model::candidate::Candidate;
use crate::model::session::{Session, SessionError};
use serde::{Deserialize, Serialize};

/// Persistable form of a session: the feed plus the position and score
/// reached so far.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub score: u32,
    pub current_index: usize,
    pub candidates: Vec<Candidate>,
}

impl SessionSnapshot {
    pub fn capture(session: &Session) -> Self {
        SessionSnapshot {
            score: session.score(),
            current_index: session.current_index(),
            candidates: session.candidates().to_vec(),
        }
    }

    pub fn restore(self) -> Result<Session, SessionError> {
        Session::from_parts(self.candidates, self.current_index, self.score)
    }

    pub fn to_json(session: &Session) -> serde_json::Result<String> {
        let snapshot = Self::capture(session);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
