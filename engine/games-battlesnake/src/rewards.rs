//! Reward functions
//!
//! Rewards are computed once all eliminations of a turn are final.

use engine_config::RewardConfig;

use crate::rules::Elimination;

/// Per-player rewards of one turn.
///
/// `alive` is the alive flag of every player after the turn.
pub fn compute_rewards(
    config: &RewardConfig,
    eliminations: &[Elimination],
    alive: &[bool],
    done: bool,
) -> Vec<f32> {
    let mut rewards = standard_rewards(eliminations, alive, done);
    if let RewardConfig::Kill { kill_reward } = *config {
        for e in eliminations {
            if let Some(by) = e.cause.killer().filter(|&by| by != e.player) {
                rewards[by] += kill_reward;
            }
        }
    }
    rewards
}

fn standard_rewards(eliminations: &[Elimination], alive: &[bool], done: bool) -> Vec<f32> {
    let n = alive.len();
    let mut rewards = vec![0.0; n];
    let survivors = alive.iter().filter(|&&a| a).count();

    // a multiplayer wipe-out is a draw
    let loss = if survivors == 0 && n > 1 { 0.0 } else { -1.0 };
    for e in eliminations {
        rewards[e.player] = loss;
    }
    if done && survivors == 1 && n > 1 {
        if let Some(winner) = alive.iter().position(|&a| a) {
            rewards[winner] = 1.0;
        }
    }
    rewards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::EliminationCause;

    fn elim(player: usize, cause: EliminationCause) -> Elimination {
        Elimination { player, cause }
    }

    #[test]
    fn test_standard_winner_and_loser() {
        let rewards = compute_rewards(
            &RewardConfig::Standard,
            &[elim(1, EliminationCause::OutOfBounds)],
            &[true, false],
            true,
        );
        assert_eq!(rewards, vec![1.0, -1.0]);
    }

    #[test]
    fn test_standard_wipe_out_is_draw() {
        let rewards = compute_rewards(
            &RewardConfig::Standard,
            &[
                elim(0, EliminationCause::HeadToHead { by: 1 }),
                elim(1, EliminationCause::HeadToHead { by: 0 }),
            ],
            &[false, false],
            true,
        );
        assert_eq!(rewards, vec![0.0, 0.0]);
    }

    #[test]
    fn test_standard_ongoing_multiplayer() {
        let rewards = compute_rewards(
            &RewardConfig::Standard,
            &[elim(2, EliminationCause::OutOfHealth)],
            &[true, true, false],
            false,
        );
        assert_eq!(rewards, vec![0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_solo_death_is_a_loss() {
        let rewards = compute_rewards(
            &RewardConfig::Standard,
            &[elim(0, EliminationCause::SelfCollision)],
            &[false],
            true,
        );
        assert_eq!(rewards, vec![-1.0]);
    }

    #[test]
    fn test_kill_reward() {
        let config = RewardConfig::Kill { kill_reward: 0.5 };
        let rewards = compute_rewards(
            &config,
            &[
                elim(1, EliminationCause::BodyCollision { by: 0 }),
                elim(2, EliminationCause::SelfCollision),
            ],
            &[true, false, false, true],
            false,
        );
        assert_eq!(rewards, vec![0.5, -1.0, -1.0, 0.0]);
    }
}
