pub mod candidate;
pub mod gesture;
pub mod outcome;
pub mod session;
