//! Position evaluation for Isolation
//!
//! All strategies share the same boundary rule: a lost position scores
//! `-inf`, a won position `+inf`. Otherwise the score is finite:
//! - Mobility difference
//! - One-ply look-ahead (extended) mobility
//! - Manhattan distance between the players
//! - Corner penalty for low-mobility cells

pub mod heuristic;

pub use heuristic::{
    corner_penalty, distance_score, evaluate, extended_mobility_score, mobility_score,
    move_count, terminal_score, Heuristic,
};
