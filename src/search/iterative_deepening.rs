use std::time::{Duration, Instant};

use rand::prelude::IndexedRandom;
use rand::Rng;
use tracing::debug;

use crate::errors::ChessResult;
use crate::game_state::board_pool::{BoardHandle, BoardPool};
use crate::game_state::chess_types::ChessMove;
use crate::move_generation::move_generator::valid_successors;
use crate::search::board_scoring::BoardScorer;
use crate::search::negamax::{negamax, UNBOUNDED};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// First depth of the anytime loop.
    pub initial_depth: u8,
    /// Hard cap on the anytime loop, keeping pool usage bounded.
    pub max_depth: u8,
    /// No new depth is started once this much time has passed.
    pub time_budget: Duration,
    /// Size of the near-best candidate set.
    pub top_moves: usize,
    /// Candidates closer together than this are treated as equally good.
    pub noise_threshold: i32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            initial_depth: 4,
            max_depth: 24,
            time_budget: Duration::from_millis(650),
            top_moves: 3,
            noise_threshold: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub chess_move: ChessMove,
    pub score: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best: Option<ScoredMove>,
    pub reached_depth: u8,
}

/// Anytime search: deepens one ply at a time until the time budget is spent.
///
/// A started depth always runs to completion; the result of the last finished
/// depth is returned.
pub fn generate_best_move<S, R>(
    pool: &BoardPool,
    handle: &BoardHandle,
    config: &SearchConfig,
    scorer: &S,
    rng: &mut R,
) -> ChessResult<SearchResult>
where
    S: BoardScorer + ?Sized,
    R: Rng + ?Sized,
{
    let started = Instant::now();
    let mut depth = config.initial_depth.max(1);

    let result = loop {
        let best = generate_best_move_at_depth(pool, handle, depth, config, scorer, rng)?;
        debug!(
            depth,
            score = best.map(|scored| scored.score),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "completed search depth"
        );

        if best.is_none() || depth >= config.max_depth || started.elapsed() >= config.time_budget {
            break SearchResult {
                best,
                reached_depth: depth,
            };
        }
        depth += 1;
    };

    Ok(result)
}

/// Best move at a fixed depth, or `None` when the side to move has no legal move.
///
/// When the top candidates are within `noise_threshold` of each other one of them
/// is picked at random.
pub fn generate_best_move_at_depth<S, R>(
    pool: &BoardPool,
    handle: &BoardHandle,
    depth: u8,
    config: &SearchConfig,
    scorer: &S,
    rng: &mut R,
) -> ChessResult<Option<ScoredMove>>
where
    S: BoardScorer + ?Sized,
    R: Rng + ?Sized,
{
    let depth = depth.max(1);
    let top_moves = config.top_moves.max(1);
    let mut candidates: Vec<ScoredMove> = Vec::with_capacity(top_moves + 1);

    for successor in valid_successors(pool, handle) {
        let (chess_move, successor) = successor?;

        // Anything scoring above the window is exact; anything at or below it
        // cannot reach the near-best set.
        let window = match candidates.first() {
            Some(best) => best.score.saturating_sub(config.noise_threshold),
            None => UNBOUNDED,
        };
        let score = -negamax(pool, &successor, depth - 1, UNBOUNDED, window, scorer)?;

        let position = candidates.partition_point(|candidate| candidate.score >= score);
        if position < top_moves {
            candidates.insert(position, ScoredMove { chess_move, score });
            candidates.truncate(top_moves);
        }
    }

    let (Some(best), Some(worst)) = (candidates.first(), candidates.last()) else {
        return Ok(None);
    };
    if candidates.len() > 1 && best.score - worst.score < config.noise_threshold {
        debug!(
            candidates = candidates.len(),
            spread = best.score - worst.score,
            "choosing among near-best moves"
        );
        return Ok(candidates.choose(rng).copied());
    }
    Ok(Some(*best))
}
