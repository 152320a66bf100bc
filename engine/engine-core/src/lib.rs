//! Core traits and types for the simulation engine
//!
//! This crate provides the fundamental abstractions shared by games:
//! - `SimultaneousGame`: typed trait for simultaneous-move games
//! - `GameMetadata`: descriptive metadata for trainers and tools
//! - `branching`: speculative stepping on clones, including draw prevention
//! - `solver`: the two-player equilibrium solver boundary

pub mod branching;
pub mod metadata;
pub mod solver;
pub mod typed;

// Re-export main types for convenience
pub use branching::{action_kills_player, step_with_draw_prevention, CommittedStep};
pub use metadata::GameMetadata;
pub use solver::{
    build_normal_form, build_normal_form_with, solve_checked, Equilibrium, EquilibriumSolver,
    NormalForm, SolverError,
};
pub use typed::{EngineId, SimultaneousGame, StepOutcome};
