use crate::model::gesture::Offset;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Horizontal distance a release must clear before a gesture counts as a
/// decision. Matches the feel of a thumb-width fling on a phone screen.
pub const DEFAULT_THRESHOLD: f32 = 120.0;

/// Discrete classification of a completed gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Accept,
    Reject,
    Undecided,
}

impl Outcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::Accept => "Accept",
            Outcome::Reject => "Reject",
            Outcome::Undecided => "Undecided",
        }
    }

    pub const fn is_decided(self) -> bool {
        !matches!(self, Outcome::Undecided)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcomeError(String);

impl fmt::Display for ParseOutcomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown outcome '{}'", self.0)
    }
}

impl std::error::Error for ParseOutcomeError {}

impl FromStr for Outcome {
    type Err = ParseOutcomeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "accept" => Ok(Outcome::Accept),
            "reject" => Ok(Outcome::Reject),
            "undecided" => Ok(Outcome::Undecided),
            _ => Err(ParseOutcomeError(value.to_string())),
        }
    }
}

/// Classify a release offset against the decision threshold.
///
/// Strict inequalities: a release at exactly the threshold stays Undecided.
/// Vertical travel never influences the decision.
pub fn classify(offset: Offset, threshold: f32) -> Outcome {
    if offset.dx > threshold {
        Outcome::Accept
    } else if offset.dx < -threshold {
        Outcome::Reject
    } else {
        Outcome::Undecided
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_THRESHOLD, Outcome, classify};
    use crate::model::gesture::Offset;

    #[test]
    fn past_threshold_right_accepts_regardless_of_dy() {
        for dy in [-500.0, -10.0, 0.0, 10.0, 500.0] {
            assert_eq!(
                classify(Offset::new(150.0, dy), DEFAULT_THRESHOLD),
                Outcome::Accept
            );
        }
    }

    #[test]
    fn past_threshold_left_rejects() {
        assert_eq!(
            classify(Offset::new(-130.0, 0.0), DEFAULT_THRESHOLD),
            Outcome::Reject
        );
    }

    #[test]
    fn short_drag_stays_undecided() {
        assert_eq!(
            classify(Offset::new(50.0, 5.0), DEFAULT_THRESHOLD),
            Outcome::Undecided
        );
        assert_eq!(
            classify(Offset::new(-50.0, -5.0), DEFAULT_THRESHOLD),
            Outcome::Undecided
        );
    }

    #[test]
    fn exact_threshold_is_a_tie_and_stays_undecided() {
        assert_eq!(
            classify(Offset::new(120.0, 0.0), DEFAULT_THRESHOLD),
            Outcome::Undecided
        );
        assert_eq!(
            classify(Offset::new(-120.0, 0.0), DEFAULT_THRESHOLD),
            Outcome::Undecided
        );
    }

    #[test]
    fn just_past_threshold_decides() {
        assert_eq!(
            classify(Offset::new(120.001, 0.0), DEFAULT_THRESHOLD),
            Outcome::Accept
        );
        assert_eq!(
            classify(Offset::new(-120.001, 0.0), DEFAULT_THRESHOLD),
            Outcome::Reject
        );
    }

    #[test]
    fn outcome_string_roundtrip() {
        for outcome in [Outcome::Accept, Outcome::Reject, Outcome::Undecided] {
            assert_eq!(outcome.as_str().parse::<Outcome>(), Ok(outcome));
        }
        assert!("maybe".parse::<Outcome>().is_err());
    }

    #[test]
    fn only_undecided_is_not_a_decision() {
        assert!(Outcome::Accept.is_decided());
        assert!(Outcome::Reject.is_decided());
        assert!(!Outcome::Undecided.is_decided());
    }
}
