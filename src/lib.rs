//! Crate root module declarations for the mailbox chess rules engine.
//!
//! This file exposes the subsystems (game state, move generation, move
//! descriptions and notation utilities) so binaries, benches and embedding
//! applications can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod engine_config;
    pub mod game_state;
    pub mod repetition;
    pub mod undo_state;
    pub mod zobrist;
}

pub mod moves {
    pub mod move_descriptions;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod perft;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod pgn;
    pub mod render_game_state;
    pub mod san;
}
