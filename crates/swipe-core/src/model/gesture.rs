use serde::{Deserialize, Serialize};

/// Cumulative pointer offset since the start of a gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub dx: f32,
    pub dy: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    pub fn magnitude(self) -> f32 {
        (self.dx * self.dx + self.dy * self.dy).sqrt()
    }
}

/// Records the latest cumulative offset of the gesture in flight.
///
/// Any finite offset is accepted; samples are discarded on `reset`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragTracker {
    offset: Offset,
}

impl DragTracker {
    pub const fn new() -> Self {
        Self {
            offset: Offset::ZERO,
        }
    }

    pub fn update(&mut self, dx: f32, dy: f32) {
        self.offset = Offset::new(dx, dy);
    }

    pub fn reset(&mut self) {
        self.offset = Offset::ZERO;
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::{DragTracker, Offset};

    #[test]
    fn tracker_keeps_latest_offset_only() {
        let mut tracker = DragTracker::new();
        tracker.update(10.0, -4.0);
        tracker.update(35.5, 2.0);
        assert_eq!(tracker.offset(), Offset::new(35.5, 2.0));
    }

    #[test]
    fn reset_returns_to_origin() {
        let mut tracker = DragTracker::new();
        tracker.update(-80.0, 12.0);
        tracker.reset();
        assert_eq!(tracker.offset(), Offset::ZERO);
    }

    #[test]
    fn magnitude_is_euclidean() {
        assert_eq!(Offset::new(3.0, 4.0).magnitude(), 5.0);
        assert_eq!(Offset::ZERO.magnitude(), 0.0);
    }
}
