//! Crate root module declarations for the pooled chess engine.
//!
//! Layers, lowest first: precomputed square geometry, the packed board and its
//! fixed-capacity pool, the rules engine, lazy move generation, and the
//! iterative-deepening search. `GameState` ties them together for a host.

pub mod errors;

pub mod geometry {
    pub mod reachability;
    pub mod sliding_rays;
    pub mod square;
    pub mod square_set;
    pub mod step_moves;
}

pub mod game_state {
    pub mod board_pool;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod packed_board;
}

pub mod rules {
    pub mod attacks;
    pub mod board_status;
    pub mod move_validation;
    pub mod piece_rules;
}

pub mod move_generation {
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod negamax;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod render_game_state;
}
