use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use swipe_core::model::gesture::Offset;

/// One drag-and-release interaction: cumulative samples, released after the
/// last one. An empty trace models a touch with no movement.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureTrace {
    samples: Vec<Offset>,
}

impl GestureTrace {
    pub fn new(samples: Vec<Offset>) -> Self {
        Self { samples }
    }

    pub fn from_pairs(pairs: &[[f32; 2]]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|[dx, dy]| Offset::new(*dx, *dy))
                .collect(),
        )
    }

    pub fn samples(&self) -> &[Offset] {
        &self.samples
    }

    pub fn release_offset(&self) -> Offset {
        self.samples.last().copied().unwrap_or(Offset::ZERO)
    }
}

/// Generate reproducible traces for a seed: each gesture ramps toward a
/// final offset within 1.2 screen widths, with a little per-sample jitter so
/// intermediate samples do not sit exactly on the ramp.
pub fn generate(count: usize, seed: u64, screen_width: f32) -> Vec<GestureTrace> {
    let mut rng = StdRng::seed_from_u64(seed);
    let reach = screen_width * 1.2;

    (0..count)
        .map(|_| {
            let final_dx = rng.gen_range(-reach..=reach);
            let final_dy = rng.gen_range(-40.0..=40.0);
            let steps = rng.gen_range(3..=12);

            let mut samples = Vec::with_capacity(steps);
            for i in 1..steps {
                let t = i as f32 / steps as f32;
                let jitter: f32 = rng.gen_range(-4.0..=4.0);
                samples.push(Offset::new(final_dx * t + jitter, final_dy * t));
            }
            samples.push(Offset::new(final_dx, final_dy));

            GestureTrace::new(samples)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{GestureTrace, generate};
    use swipe_core::model::gesture::Offset;

    #[test]
    fn release_offset_is_the_last_sample() {
        let trace = GestureTrace::from_pairs(&[[10.0, 0.0], [80.0, 4.0], [150.0, 9.0]]);
        assert_eq!(trace.release_offset(), Offset::new(150.0, 9.0));
    }

    #[test]
    fn empty_trace_releases_at_origin() {
        let trace = GestureTrace::new(Vec::new());
        assert_eq!(trace.release_offset(), Offset::ZERO);
    }

    #[test]
    fn generation_is_reproducible_for_a_seed() {
        let first = generate(8, 4242, 390.0);
        let second = generate(8, 4242, 390.0);
        assert_eq!(first, second);
        assert_eq!(first.len(), 8);
    }

    #[test]
    fn different_seeds_diverge() {
        assert_ne!(generate(4, 1, 390.0), generate(4, 2, 390.0));
    }

    #[test]
    fn generated_releases_stay_within_reach() {
        for trace in generate(32, 7, 390.0) {
            let release = trace.release_offset();
            assert!(release.dx.abs() <= 390.0 * 1.2);
            assert!(release.dy.abs() <= 40.0);
            assert!(!trace.samples().is_empty());
        }
    }
}
