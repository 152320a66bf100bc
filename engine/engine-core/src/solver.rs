//! Two-player equilibrium solver boundary
//!
//! The engine builds normal-form games from a state by stepping copies of it
//! and hands them to an external [`EquilibriumSolver`]. Solver algorithms live
//! outside this crate; only the input and output shapes are checked here.

use serde::{Deserialize, Serialize};

use crate::typed::{SimultaneousGame, StepOutcome};

/// Tolerance on the probability mass of a returned policy
pub const POLICY_TOLERANCE: f32 = 1e-4;

/// Error type for malformed solver input or output
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolverError {
    #[error("normal form needs exactly 2 players at turn, got {0}")]
    PlayerCount(usize),
    #[error("payoff table has {actual} entries, expected {expected}")]
    ShapeMismatch { expected: usize, actual: usize },
    #[error("policy of player {player} is invalid: {reason}")]
    InvalidPolicy { player: usize, reason: String },
    #[error("stepping a branch failed: {0}")]
    Step(String),
    #[error("solver failed: {0}")]
    Solver(String),
}

/// Two-player game in normal form
///
/// `payoffs[i * col_actions.len() + j]` holds the payoffs of both players when
/// the row player plays `row_actions[i]` and the column player plays
/// `col_actions[j]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalForm<A> {
    pub players: [usize; 2],
    pub row_actions: Vec<A>,
    pub col_actions: Vec<A>,
    pub payoffs: Vec<[f32; 2]>,
}

impl<A> NormalForm<A> {
    pub fn shape(&self) -> (usize, usize) {
        (self.row_actions.len(), self.col_actions.len())
    }

    pub fn payoff(&self, row: usize, col: usize) -> [f32; 2] {
        self.payoffs[row * self.col_actions.len() + col]
    }

    /// Check that the payoff table matches the action lists
    pub fn check(&self) -> Result<(), SolverError> {
        let expected = self.row_actions.len() * self.col_actions.len();
        if self.payoffs.len() != expected {
            return Err(SolverError::ShapeMismatch {
                expected,
                actual: self.payoffs.len(),
            });
        }
        Ok(())
    }
}

/// Solution returned by an external solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equilibrium {
    /// Expected value for the row and column player
    pub values: [f32; 2],
    /// Mixed strategies over `row_actions` and `col_actions`
    pub policies: [Vec<f32>; 2],
}

impl Equilibrium {
    /// Validate the solution against the form it was computed for
    pub fn check<A>(&self, form: &NormalForm<A>) -> Result<(), SolverError> {
        let (rows, cols) = form.shape();
        for (player, (policy, len)) in self.policies.iter().zip([rows, cols]).enumerate() {
            if policy.len() != len {
                return Err(SolverError::InvalidPolicy {
                    player,
                    reason: format!("{} probabilities for {} actions", policy.len(), len),
                });
            }
            if policy.iter().any(|p| !p.is_finite() || *p < 0.0) {
                return Err(SolverError::InvalidPolicy {
                    player,
                    reason: "probabilities must be finite and non-negative".into(),
                });
            }
            let mass: f32 = policy.iter().sum();
            if (mass - 1.0).abs() > POLICY_TOLERANCE {
                return Err(SolverError::InvalidPolicy {
                    player,
                    reason: format!("probabilities sum to {mass}"),
                });
            }
        }
        Ok(())
    }
}

/// Opaque two-player equilibrium solver
pub trait EquilibriumSolver {
    fn solve<A>(&self, form: &NormalForm<A>) -> Result<Equilibrium, SolverError>;
}

/// Run a solver and validate both its input and its output
pub fn solve_checked<S, A>(solver: &S, form: &NormalForm<A>) -> Result<Equilibrium, SolverError>
where
    S: EquilibriumSolver,
{
    form.check()?;
    let equilibrium = solver.solve(form)?;
    equilibrium.check(form)?;
    Ok(equilibrium)
}

/// Build the normal form of the current state using step rewards as payoffs
pub fn build_normal_form<G: SimultaneousGame>(game: &G) -> Result<NormalForm<G::Action>, SolverError> {
    build_normal_form_with(game, |_, outcome: &StepOutcome<G::Info>, players| {
        [outcome.rewards[players[0]], outcome.rewards[players[1]]]
    })
}

/// Build the normal form of the current state with a custom payoff.
///
/// `payoff` receives the stepped copy, the step outcome and the two player ids.
pub fn build_normal_form_with<G, F>(game: &G, mut payoff: F) -> Result<NormalForm<G::Action>, SolverError>
where
    G: SimultaneousGame,
    F: FnMut(&G, &StepOutcome<G::Info>, [usize; 2]) -> [f32; 2],
{
    let at_turn = game.players_at_turn();
    let players: [usize; 2] = at_turn
        .as_slice()
        .try_into()
        .map_err(|_| SolverError::PlayerCount(at_turn.len()))?;

    let row_actions = game.available_actions(players[0]);
    let col_actions = game.available_actions(players[1]);
    let mut payoffs = Vec::with_capacity(row_actions.len() * col_actions.len());
    for &row in &row_actions {
        for &col in &col_actions {
            let mut copy = game.get_copy();
            let outcome = copy
                .step(&[row, col])
                .map_err(|e| SolverError::Step(e.to_string()))?;
            payoffs.push(payoff(&copy, &outcome, players));
        }
    }

    Ok(NormalForm {
        players,
        row_actions,
        col_actions,
        payoffs,
    })
}
