use crate::model::candidate::Candidate;
use crate::model::outcome::Outcome;
use serde::{Deserialize, Serialize};

/// Aggregate state of one decision queue: candidate order, current position,
/// cumulative score. Mutated only through [`Session::advance`]; index and
/// score always move together.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    candidates: Vec<Candidate>,
    current_index: usize,
    score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    EmptyFeed,
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceError {
    UndecidedOutcome,
}

/// Read-only progress view for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub index: usize,
    pub score: u32,
}

/// Result of one applied decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    pub outcome: Outcome,
    pub new_index: usize,
    pub score: u32,
    pub wrapped: bool,
}

impl Session {
    pub fn new(candidates: Vec<Candidate>, initial_score: u32) -> Result<Self, SessionError> {
        if candidates.is_empty() {
            return Err(SessionError::EmptyFeed);
        }

        Ok(Self {
            candidates,
            current_index: 0,
            score: initial_score,
        })
    }

    /// Rebuild a session at a given position, e.g. from a stored snapshot.
    pub fn from_parts(
        candidates: Vec<Candidate>,
        current_index: usize,
        score: u32,
    ) -> Result<Self, SessionError> {
        if candidates.is_empty() {
            return Err(SessionError::EmptyFeed);
        }

        if current_index >= candidates.len() {
            return Err(SessionError::IndexOutOfRange {
                index: current_index,
                len: candidates.len(),
            });
        }

        Ok(Self {
            candidates,
            current_index,
            score,
        })
    }

    pub fn current_candidate(&self) -> &Candidate {
        &self.candidates[self.current_index]
    }

    /// Apply a decided outcome: award the candidate's weight on Accept,
    /// then move to the next candidate, wrapping past the end of the feed.
    /// The score saturates at `u32::MAX`.
    ///
    /// Index and score update as one transition; callers never observe a
    /// session with only one of the two applied.
    pub fn advance(&mut self, outcome: Outcome) -> Result<Advance, AdvanceError> {
        if !outcome.is_decided() {
            return Err(AdvanceError::UndecidedOutcome);
        }

        let weight = self.current_candidate().weight;
        let next_index = (self.current_index + 1) % self.candidates.len();
        assert!(
            next_index < self.candidates.len(),
            "advance left index {next_index} outside feed of {}",
            self.candidates.len()
        );

        let wrapped = next_index == 0;
        if outcome == Outcome::Accept {
            self.score = self.score.saturating_add(weight);
        }
        self.current_index = next_index;

        Ok(Advance {
            outcome,
            new_index: next_index,
            score: self.score,
            wrapped,
        })
    }

    pub fn snapshot(&self) -> Progress {
        Progress {
            index: self.current_index,
            score: self.score,
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}
