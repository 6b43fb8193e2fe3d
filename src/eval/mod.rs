//! Position evaluation

pub mod heuristic;
pub mod patterns;

pub use heuristic::evaluate;
pub use patterns::LineScore;
