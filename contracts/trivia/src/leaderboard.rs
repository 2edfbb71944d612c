//! Leaderboard construction for published games.
//!
//! Positions are ordered by score, highest first. Insertion only moves an
//! entry ahead of strictly lower scores, so ties keep the order in which the
//! entrants were given (submission order).

use soroban_sdk::{Address, Env, Vec};

use crate::{LeaderboardPosition, RankedPosition};

/// Rank `entrants[i]` with `scores[i]`. Both vectors are in submission order
/// and have the same length.
pub fn build_leaderboard(
    env: &Env,
    game_id: u32,
    entrants: &Vec<Address>,
    scores: &Vec<u32>,
) -> Vec<LeaderboardPosition> {
    let mut board: Vec<LeaderboardPosition> = Vec::new(env);

    for (player, score) in entrants.iter().zip(scores.iter()) {
        let mut pos = board.len();
        while pos > 0 && board.get_unchecked(pos - 1).score < score {
            pos -= 1;
        }
        board.insert(
            pos,
            LeaderboardPosition {
                game_id,
                player,
                score,
            },
        );
    }

    board
}

/// 1-based position of `player`, or `None` if they are not on the board.
pub fn rank_of(board: &Vec<LeaderboardPosition>, player: &Address) -> Option<RankedPosition> {
    let idx = board.iter().position(|p| p.player == *player)?;
    let entry = board.get_unchecked(idx as u32);
    Some(RankedPosition {
        rank: idx as u32 + 1,
        player: entry.player,
        score: entry.score,
    })
}
