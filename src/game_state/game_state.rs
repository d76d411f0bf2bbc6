//! Host-facing game facade.
//!
//! `GameState` owns a board pool and one board inside it holding the live
//! position. Every query and search runs against that pool, so a game never
//! allocates boards after construction.

use std::fmt;

use rand::Rng;

use crate::errors::{ChessErrors, ChessResult};
use crate::game_state::board_pool::{BoardHandle, BoardPool, DEFAULT_POOL_CAPACITY};
use crate::game_state::chess_types::{BoardStatus, CastlingSide, ChessMove, Color, Piece, PieceKind};
use crate::game_state::packed_board::PackedBoard;
use crate::geometry::square::Square;
use crate::move_generation::move_generator::valid_moves;
use crate::rules::board_status::board_status;
use crate::rules::move_validation::validate_move;
use crate::search::board_scoring::PositionalMaterialScorer;
use crate::search::iterative_deepening::{
    generate_best_move, generate_best_move_at_depth, SearchConfig, SearchResult,
};
use crate::utils::algebraic::parse_long_algebraic;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::render_game_state::render_board;

#[derive(Debug)]
pub struct GameState {
    pool: BoardPool,
    // Lives as long as the pool; never released on its own.
    board: BoardHandle,
    config: SearchConfig,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    /// Standard opening position with the default pool and search settings.
    pub fn new_game() -> Self {
        match Self::with_pool(BoardPool::new(), PackedBoard::opening()) {
            Ok(game) => game,
            Err(err) => unreachable!("a fresh pool of {DEFAULT_POOL_CAPACITY} boards is empty: {err}"),
        }
    }

    /// Opening position in a pool of `capacity` boards. One board holds the game
    /// itself; the rest bound how deep search can go.
    pub fn with_pool_capacity(capacity: usize) -> ChessResult<Self> {
        Self::with_pool(BoardPool::with_capacity(capacity), PackedBoard::opening())
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        Self::with_pool(BoardPool::new(), parse_fen(fen)?)
    }

    fn with_pool(pool: BoardPool, position: PackedBoard) -> ChessResult<Self> {
        let board = pool.acquire()?;
        pool.load(&board, position);
        Ok(Self {
            pool,
            board,
            config: SearchConfig::default(),
        })
    }

    pub fn to_fen(&self) -> String {
        generate_fen(&self.snapshot())
    }

    pub fn pool(&self) -> &BoardPool {
        &self.pool
    }

    pub fn handle(&self) -> &BoardHandle {
        &self.board
    }

    pub fn snapshot(&self) -> PackedBoard {
        self.pool.snapshot(&self.board)
    }

    pub fn search_config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_search_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    pub fn active_color(&self) -> Color {
        self.pool.active_color(&self.board)
    }

    pub fn occupant(&self, square: &Square) -> Option<Piece> {
        self.pool.occupant(&self.board, square)
    }

    pub fn king_square(&self, color: Color) -> &'static Square {
        self.pool.king_square(&self.board, color)
    }

    pub fn can_castle(&self, color: Color, side: CastlingSide) -> bool {
        self.pool.can_castle(&self.board, color, side)
    }

    pub fn en_passant_column(&self) -> Option<u8> {
        self.pool.en_passant_column(&self.board)
    }

    pub fn status(&self) -> ChessResult<BoardStatus> {
        board_status(&self.pool, &self.board)
    }

    /// Plays a move if it is legal and returns the resulting status.
    ///
    /// An illegal move, or a pawn reaching its last row as a pawn or king, returns
    /// `BoardStatus::Invalid` and leaves the position untouched. `promotion` is
    /// ignored unless a pawn reaches its last row, where `None` means a queen.
    pub fn try_move(
        &mut self,
        from: &Square,
        to: &Square,
        promotion: Option<PieceKind>,
    ) -> ChessResult<BoardStatus> {
        let promoting = matches!(
            self.occupant(from),
            Some(Piece { color, kind: PieceKind::Pawn }) if to.row() == color.promotion_row()
        );
        if promoting && promotion.is_some_and(|kind| !kind.is_promotion_target()) {
            return Ok(BoardStatus::Invalid);
        }
        if !validate_move(&self.pool, &self.board, from, to)? {
            return Ok(BoardStatus::Invalid);
        }

        self.pool.commit_move(&self.board, from, to, promotion);
        self.status()
    }

    /// Plays a move written in long algebraic notation, e.g. `e2e4` or `e7e8n`.
    pub fn play(&mut self, text: &str) -> ChessResult<BoardStatus> {
        let chess_move = parse_long_algebraic(text)?;
        self.try_move(chess_move.from, chess_move.to, chess_move.promotion)
    }

    pub fn valid_moves(&self) -> ChessResult<Vec<ChessMove>> {
        valid_moves(&self.pool, &self.board).collect()
    }

    /// Time-boxed search using the game's search settings.
    pub fn best_move(&self) -> ChessResult<Option<ChessMove>> {
        let result = self.search_with_rng(&mut rand::rng())?;
        Ok(result.best.map(|scored| scored.chess_move))
    }

    pub fn search_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> ChessResult<SearchResult> {
        generate_best_move(
            &self.pool,
            &self.board,
            &self.config,
            &PositionalMaterialScorer,
            rng,
        )
    }

    /// Fixed-depth search.
    pub fn best_move_at_depth(&self, depth: u8) -> ChessResult<Option<ChessMove>> {
        self.best_move_at_depth_with_rng(depth, &mut rand::rng())
    }

    /// Fixed-depth search with a caller-supplied RNG, reproducible when seeded.
    pub fn best_move_at_depth_with_rng<R: Rng + ?Sized>(
        &self,
        depth: u8,
        rng: &mut R,
    ) -> ChessResult<Option<ChessMove>> {
        if depth as usize + 2 > self.pool.capacity() {
            return Err(ChessErrors::PoolExhausted {
                capacity: self.pool.capacity(),
            });
        }
        let best = generate_best_move_at_depth(
            &self.pool,
            &self.board,
            depth,
            &self.config,
            &PositionalMaterialScorer,
            rng,
        )?;
        Ok(best.map(|scored| scored.chess_move))
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(&self.snapshot()))
    }
}
