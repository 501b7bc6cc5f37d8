use serde::{Deserialize, Serialize};

/// One user on the community leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entrant {
    pub id: String,
    pub name: String,
    pub points: u32,
    pub items_donated: u32,
    pub co2_saved_kg: f32,
    pub badges: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardError {
    UnknownEntrant(String),
}

/// Standings ordered by points, highest first. Ranks are 1-based; ties keep
/// their insertion order (stable sort).
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    entrants: Vec<Entrant>,
}

impl Leaderboard {
    pub fn new(mut entrants: Vec<Entrant>) -> Self {
        entrants.sort_by(|a, b| b.points.cmp(&a.points));
        Self { entrants }
    }

    pub fn standings(&self) -> &[Entrant] {
        &self.entrants
    }

    pub fn top(&self, n: usize) -> &[Entrant] {
        &self.entrants[..n.min(self.entrants.len())]
    }

    /// 1-based rank of an entrant, if present.
    pub fn rank_of(&self, id: &str) -> Option<usize> {
        self.entrants
            .iter()
            .position(|e| e.id == id)
            .map(|index| index + 1)
    }

    /// Award points and re-rank in one step; returns the entrant's new
    /// total.
    pub fn record_points(&mut self, id: &str, delta: u32) -> Result<u32, LeaderboardError> {
        let entrant = self
            .entrants
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| LeaderboardError::UnknownEntrant(id.to_string()))?;
        entrant.points += delta;
        let total = entrant.points;
        self.entrants.sort_by(|a, b| b.points.cmp(&a.points));
        Ok(total)
    }
}

/// Progress toward one community achievement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub progress: u32,
    pub target: u32,
}

impl Achievement {
    pub fn is_complete(&self) -> bool {
        self.progress >= self.target
    }

    /// Fraction complete in `[0.0, 1.0]`, for progress bars.
    pub fn progress_fraction(&self) -> f32 {
        if self.target == 0 {
            return 1.0;
        }
        (self.progress as f32 / self.target as f32).min(1.0)
    }

    pub fn record(&mut self, delta: u32) {
        self.progress = self.progress.saturating_add(delta);
    }
}
