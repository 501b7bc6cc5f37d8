pub mod leaderboard;
pub mod locations;
pub mod tutorial;
