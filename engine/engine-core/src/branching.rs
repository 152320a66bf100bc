//! Speculative stepping on cloned games
//!
//! Helpers that evaluate hypothetical joint actions on copies of a game and
//! only commit to the authoritative game once a joint action is chosen.

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::typed::{SimultaneousGame, StepOutcome};

/// Joint action that was actually applied, with its outcome
#[derive(Debug, Clone, PartialEq)]
pub struct CommittedStep<A, I> {
    pub joint_action: Vec<A>,
    pub outcome: StepOutcome<I>,
    /// True when the yielding player's action was replaced
    pub rewritten: bool,
}

/// Whether `player` is no longer at turn after stepping a copy of `game`.
///
/// A joint action the game rejects counts as fatal.
pub fn action_kills_player<G: SimultaneousGame>(game: &G, player: usize, joint: &[G::Action]) -> bool {
    let mut copy = game.get_copy();
    match copy.step(joint) {
        Ok(_) => !copy.players_at_turn().contains(&player),
        Err(_) => true,
    }
}

/// Step `game`, rewriting one player's action when the joint action would end
/// a two-player game.
///
/// With exactly two players at turn the joint action is first tried on a copy.
/// If the copy ends, one of the two players is picked uniformly to yield and
/// its other legal actions are tried on fresh copies of the original game. The
/// committed action is drawn uniformly from those that keep the yielding
/// player alive, or is the original one when there are none.
pub fn step_with_draw_prevention<G: SimultaneousGame>(
    game: &mut G,
    joint: &[G::Action],
    rng: &mut ChaCha20Rng,
) -> Result<CommittedStep<G::Action, G::Info>, G::Error> {
    let players = game.players_at_turn();
    if players.len() != 2 {
        return commit(game, joint.to_vec(), false);
    }

    let mut copy = game.get_copy();
    copy.step(joint)?;
    if !copy.is_terminal() {
        return commit(game, joint.to_vec(), false);
    }

    let yield_idx = rng.gen_range(0..2);
    let yield_player = players[yield_idx];
    let original = joint[yield_idx];

    let alternatives: Vec<G::Action> = game
        .available_actions(yield_player)
        .into_iter()
        .filter(|&action| action != original)
        .filter(|&action| {
            let mut candidate = joint.to_vec();
            candidate[yield_idx] = action;
            !action_kills_player(game, yield_player, &candidate)
        })
        .collect();

    if alternatives.is_empty() {
        return commit(game, joint.to_vec(), false);
    }

    let mut rewritten = joint.to_vec();
    rewritten[yield_idx] = alternatives[rng.gen_range(0..alternatives.len())];
    debug!(
        player = yield_player,
        original = ?original,
        replacement = ?rewritten[yield_idx],
        "draw prevented"
    );
    commit(game, rewritten, true)
}

fn commit<G: SimultaneousGame>(
    game: &mut G,
    joint_action: Vec<G::Action>,
    rewritten: bool,
) -> Result<CommittedStep<G::Action, G::Info>, G::Error> {
    let outcome = game.step(&joint_action)?;
    Ok(CommittedStep {
        joint_action,
        outcome,
        rewritten,
    })
}
