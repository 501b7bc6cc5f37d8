use crate::model::gesture::Offset;
use crate::model::outcome::Outcome;

/// Fixed duration of the off-screen fling after a decided release.
pub const FLING_DURATION_MS: f32 = 250.0;

/// Spring decay half-life for an undecided release returning to origin.
pub const SPRING_HALF_LIFE_MS: f32 = 60.0;

/// Distance from origin below which a settling card counts as home.
pub const SETTLE_EPSILON: f32 = 0.5;

/// Terminal value of a release, decoupled from how it is animated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettlePlan {
    /// Decided: travel to a horizontal terminal over a fixed duration.
    Fling { terminal: Offset, duration_ms: f32 },
    /// Undecided: decay back to origin, converging asymptotically.
    Spring { terminal: Offset },
}

impl SettlePlan {
    pub fn for_outcome(outcome: Outcome, screen_width: f32) -> SettlePlan {
        match outcome {
            Outcome::Accept => SettlePlan::Fling {
                terminal: Offset::new(screen_width, 0.0),
                duration_ms: FLING_DURATION_MS,
            },
            Outcome::Reject => SettlePlan::Fling {
                terminal: Offset::new(-screen_width, 0.0),
                duration_ms: FLING_DURATION_MS,
            },
            Outcome::Undecided => SettlePlan::Spring {
                terminal: Offset::ZERO,
            },
        }
    }
}

/// Linear position along a fling, clamped to the terminal once the
/// duration has elapsed.
pub fn fling_position(start: Offset, terminal: Offset, elapsed_ms: f32, duration_ms: f32) -> Offset {
    if elapsed_ms >= duration_ms {
        return terminal;
    }
    let t = elapsed_ms / duration_ms;
    Offset::new(
        start.dx + (terminal.dx - start.dx) * t,
        start.dy + (terminal.dy - start.dy) * t,
    )
}

/// One spring step toward the origin.
pub fn spring_step(current: Offset, dt_ms: f32) -> Offset {
    let retention = 0.5_f32.powf(dt_ms / SPRING_HALF_LIFE_MS);
    Offset::new(current.dx * retention, current.dy * retention)
}

/// A settling card is home once it sits within the epsilon of origin.
pub fn is_settled(offset: Offset) -> bool {
    offset.magnitude() <= SETTLE_EPSILON
}

#[cfg(test)]
mod tests {
    use super::{
        FLING_DURATION_MS, SettlePlan, fling_position, is_settled, spring_step,
    };
    use crate::model::gesture::Offset;
    use crate::model::outcome::Outcome;

    #[test]
    fn accept_flings_off_the_right_edge() {
        let plan = SettlePlan::for_outcome(Outcome::Accept, 390.0);
        assert_eq!(
            plan,
            SettlePlan::Fling {
                terminal: Offset::new(390.0, 0.0),
                duration_ms: FLING_DURATION_MS
            }
        );
    }

    #[test]
    fn reject_flings_off_the_left_edge() {
        match SettlePlan::for_outcome(Outcome::Reject, 390.0) {
            SettlePlan::Fling { terminal, .. } => assert_eq!(terminal.dx, -390.0),
            other => panic!("expected fling, got {other:?}"),
        }
    }

    #[test]
    fn undecided_springs_to_origin() {
        assert_eq!(
            SettlePlan::for_outcome(Outcome::Undecided, 390.0),
            SettlePlan::Spring {
                terminal: Offset::ZERO
            }
        );
    }

    #[test]
    fn fling_interpolates_and_clamps() {
        let start = Offset::new(150.0, 10.0);
        let terminal = Offset::new(390.0, 0.0);
        let halfway = fling_position(start, terminal, 125.0, 250.0);
        assert_eq!(halfway, Offset::new(270.0, 5.0));
        assert_eq!(fling_position(start, terminal, 250.0, 250.0), terminal);
        assert_eq!(fling_position(start, terminal, 400.0, 250.0), terminal);
    }

    #[test]
    fn spring_decays_monotonically() {
        let mut position = Offset::new(100.0, -40.0);
        let mut last = position.magnitude();
        for _ in 0..20 {
            position = spring_step(position, 16.0);
            let magnitude = position.magnitude();
            assert!(magnitude < last);
            last = magnitude;
        }
    }

    #[test]
    fn spring_converges_within_epsilon() {
        let mut position = Offset::new(390.0, 60.0);
        let mut ticks = 0;
        while !is_settled(position) {
            position = spring_step(position, 16.0);
            ticks += 1;
            assert!(ticks < 200, "spring failed to converge");
        }
        assert!(ticks > 0);
    }
}
