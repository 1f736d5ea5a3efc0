//! The engine facade: one owned, mutable game.
//!
//! `GameState` holds the position, the zobrist table it hashes with, the
//! stack of played moves and the repetition counts. Everything a rendering or
//! UI layer needs goes through its methods. Legality queries apply and undo
//! moves internally, so they borrow the state mutably and leave it exactly as
//! they found it.

use tracing::debug;

use crate::chess_errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{FIFTY_MOVE_HALFMOVES, STARTING_POSITION_FEN};
use crate::game_state::chess_types::*;
use crate::game_state::engine_config::EngineConfig;
use crate::game_state::repetition::RepetitionTracker;
use crate::game_state::undo_state::HistoryEntry;
use crate::game_state::zobrist::ZobristKeys;
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{
    generate_legal_moves, generate_legal_moves_from, has_legal_move,
};
use crate::move_generation::perft::perft;
use crate::moves::move_descriptions::{Move, MoveAnnotations};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::{parse_fen, FenPosition};
use crate::utils::long_algebraic::{find_matching_move, MoveRequest};
use crate::utils::pgn::write_pgn;
use crate::utils::render_game_state::{board_matrix, render_board};
use crate::utils::san::move_to_san;

/// Outcome of the current position, checked in this order: no legal move
/// (mate or stalemate), threefold repetition, fifty-move rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    ThreefoldRepetition,
    FiftyMoveRule,
}

#[derive(Debug, Clone)]
pub struct GameState {
    // --- Position ---
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_square: Option<Square>,

    // --- Clocks / move counters ---
    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,

    // --- Incremental hashing ---
    pub(crate) zobrist_key: u64,
    pub(crate) keys: Box<ZobristKeys>,

    // --- Played moves and repetition support ---
    pub(crate) history: Vec<HistoryEntry>,
    pub(crate) repetitions: RepetitionTracker,
    pub(crate) san_history: Vec<String>,

    // --- Where the current game started ---
    initial_fen: String,
    initial_side_to_move: Color,
    initial_fullmove_number: u16,

    config: EngineConfig,
}

impl GameState {
    #[inline]
    pub fn new_game() -> Self {
        Self::from_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        Self::with_config(fen, EngineConfig::default())
    }

    /// Build a game from `fen`, generating the zobrist table from
    /// `config.zobrist_seed`.
    pub fn with_config(fen: &str, config: EngineConfig) -> ChessResult<Self> {
        let position = parse_fen(fen)?;
        let mut state = Self {
            board: Board::empty(),
            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            zobrist_key: 0,
            keys: Box::new(ZobristKeys::new(config.zobrist_seed)),
            history: Vec::new(),
            repetitions: RepetitionTracker::new(),
            san_history: Vec::new(),
            initial_fen: String::new(),
            initial_side_to_move: Color::White,
            initial_fullmove_number: 1,
            config,
        };
        state.install(position);
        Ok(state)
    }

    /// Replace the position with `fen`, discarding history and repetition
    /// counts. The zobrist table is kept. On error the state is unchanged.
    pub fn load_fen(&mut self, fen: &str) -> ChessResult<()> {
        let position = parse_fen(fen)?;
        self.install(position);
        debug!(fen = %self.initial_fen, "loaded position");
        Ok(())
    }

    #[inline]
    pub fn reset(&mut self) -> ChessResult<()> {
        self.load_fen(STARTING_POSITION_FEN)
    }

    fn install(&mut self, position: FenPosition) {
        self.board = position.board;
        self.side_to_move = position.side_to_move;
        self.castling_rights = position.castling_rights;
        self.en_passant_square = position.en_passant_square;
        self.halfmove_clock = position.halfmove_clock;
        self.fullmove_number = position.fullmove_number;
        self.zobrist_key = self.keys.compute(
            &self.board,
            self.side_to_move,
            self.castling_rights,
            self.en_passant_square,
        );

        self.history.clear();
        self.san_history.clear();
        self.repetitions.clear();
        self.repetitions.record(self.zobrist_key);

        self.initial_fen = generate_fen(self);
        self.initial_side_to_move = self.side_to_move;
        self.initial_fullmove_number = self.fullmove_number;
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn zobrist_keys(&self) -> &ZobristKeys {
        &self.keys
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    #[inline]
    pub fn zobrist_key(&self) -> u64 {
        self.zobrist_key
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.board.king_square(color)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    /// Normalized FEN of the position the current game started from.
    #[inline]
    pub fn initial_fen(&self) -> &str {
        &self.initial_fen
    }

    #[inline]
    pub fn initial_side_to_move(&self) -> Color {
        self.initial_side_to_move
    }

    #[inline]
    pub fn initial_fullmove_number(&self) -> u16 {
        self.initial_fullmove_number
    }

    /// SAN of every move played since the last load, oldest first.
    #[inline]
    pub fn san_history(&self) -> &[String] {
        &self.san_history
    }

    /// Played moves, oldest first, with captures and annotations filled in.
    pub fn moves_played(&self) -> impl Iterator<Item = &Move> + '_ {
        self.history.iter().map(|entry| &entry.mv)
    }

    /// How often the current position has occurred in this game.
    #[inline]
    pub fn repetition_count(&self) -> u32 {
        self.repetitions.count(self.zobrist_key)
    }

    pub fn legal_moves(&mut self) -> ChessResult<Vec<Move>> {
        generate_legal_moves(self)
    }

    pub fn legal_moves_from(&mut self, from: Square) -> ChessResult<Vec<Move>> {
        generate_legal_moves_from(self, from)
    }

    /// Destination squares reachable from `from`, for move highlighting. A
    /// promoting pawn's square appears once.
    pub fn legal_destinations(&mut self, from: Square) -> ChessResult<Vec<Square>> {
        let mut out: Vec<Square> = Vec::new();
        for mv in self.legal_moves_from(from)? {
            if !out.contains(&mv.to) {
                out.push(mv.to);
            }
        }
        Ok(out)
    }

    /// Play the legal move named by `request`. Returns `Ok(None)` without
    /// touching the state when no legal move matches.
    pub fn make_move(&mut self, request: MoveRequest) -> ChessResult<Option<Move>> {
        let legal = self.legal_moves()?;
        let Some(mut mv) = find_matching_move(&request, &legal, self.config.default_promotion) else {
            debug!(?request, "rejected move request");
            return Ok(None);
        };

        let undo = apply_move(self, &mv)?;
        mv.captured = undo.captured_piece;

        let check = self.is_in_check();
        let has_reply = has_legal_move(self)?;
        let mate = check && !has_reply;
        let stalemate = !check && !has_reply;
        let san = move_to_san(&mv, &legal, check, mate);
        mv.annotations = Some(MoveAnnotations {
            san: san.clone(),
            check,
            mate,
            stalemate,
        });

        let position_key = self.zobrist_key;
        self.repetitions.record(position_key);
        self.history.push(HistoryEntry {
            mv: mv.clone(),
            undo,
            position_key,
        });
        self.san_history.push(san);

        Ok(Some(mv))
    }

    /// Coordinate-notation entry point (`e2e4`, `e7e8q`). Unparseable text is
    /// treated like an illegal move.
    pub fn make_move_lan(&mut self, text: &str) -> ChessResult<Option<Move>> {
        match MoveRequest::parse(text) {
            Ok(request) => self.make_move(request),
            Err(err) => {
                debug!(%err, "rejected move text");
                Ok(None)
            }
        }
    }

    /// Take back the last played move. Does nothing and returns `None` when
    /// no move has been played since the last load.
    pub fn undo(&mut self) -> Option<Move> {
        let entry = self.history.pop()?;
        self.repetitions.forget(entry.position_key);
        self.san_history.pop();
        undo_move(self, &entry.mv, &entry.undo);
        Some(entry.mv)
    }

    /// Whether the side to move is in check.
    #[inline]
    pub fn is_in_check(&self) -> bool {
        is_king_in_check(self, self.side_to_move)
    }

    pub fn is_checkmate(&mut self) -> ChessResult<bool> {
        Ok(self.is_in_check() && !has_legal_move(self)?)
    }

    pub fn is_stalemate(&mut self) -> ChessResult<bool> {
        Ok(!self.is_in_check() && !has_legal_move(self)?)
    }

    #[inline]
    pub fn is_threefold_repetition(&self) -> bool {
        self.repetitions.is_threefold()
    }

    #[inline]
    pub fn is_fifty_move_rule(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_HALFMOVES
    }

    pub fn status(&mut self) -> ChessResult<GameStatus> {
        if !has_legal_move(self)? {
            return Ok(if self.is_in_check() {
                GameStatus::Checkmate {
                    winner: self.side_to_move.opposite(),
                }
            } else {
                GameStatus::Stalemate
            });
        }
        if self.is_threefold_repetition() {
            return Ok(GameStatus::ThreefoldRepetition);
        }
        if self.is_fifty_move_rule() {
            return Ok(GameStatus::FiftyMoveRule);
        }
        Ok(GameStatus::Ongoing)
    }

    /// FEN piece letters, rank 8 first; `.` marks an empty square.
    #[inline]
    pub fn board_matrix(&self) -> [[char; 8]; 8] {
        board_matrix(&self.board)
    }

    #[inline]
    pub fn render(&self) -> String {
        render_board(&self.board)
    }

    #[inline]
    pub fn perft(&mut self, depth: u8) -> ChessResult<u64> {
        perft(self, depth)
    }

    /// PGN of the game so far. See [`write_pgn`] for tag handling.
    #[inline]
    pub fn export_pgn(&self, tags: &[(&str, &str)]) -> String {
        write_pgn(self, tags)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::{GameState, GameStatus};
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;
    use crate::game_state::engine_config::EngineConfig;
    use crate::game_state::zobrist::compute_zobrist_key;
    use crate::move_generation::legal_move_checks::is_king_in_check;
    use crate::moves::move_descriptions::Move;
    use crate::utils::algebraic::algebraic_to_square;
    use crate::utils::long_algebraic::MoveRequest;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("square should parse")
    }

    fn play(game: &mut GameState, lans: &[&str]) {
        for lan in lans {
            game.make_move_lan(lan)
                .expect("move generation should succeed")
                .unwrap_or_else(|| panic!("{lan} should be legal"));
        }
    }

    fn assert_one_king_each(game: &GameState) {
        for color in [Color::White, Color::Black] {
            let king = Piece::new(color, PieceKind::King);
            assert_eq!(game.board().count_pieces(king), 1);
            let cached = game.king_square(color).expect("king square should be cached");
            assert_eq!(game.piece_at(cached), Some(king));
        }
    }

    #[test]
    fn new_game_matches_starting_fen() {
        let game = GameState::new_game();
        assert_eq!(game.get_fen(), STARTING_POSITION_FEN);
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.repetition_count(), 1);
        assert_eq!(game.initial_fen(), STARTING_POSITION_FEN);
    }

    #[test]
    fn invalid_fen_is_rejected_and_load_keeps_state() {
        assert!(matches!(
            GameState::from_fen("8/8/8 w - - 0 1"),
            Err(ChessError::InvalidFen(_))
        ));
        assert!(matches!(
            GameState::from_fen("4k3/8/8/3P4/8/8/8/4K3 w - e6 0 1"),
            Err(ChessError::InvalidFen(_))
        ));

        let mut game = GameState::new_game();
        play(&mut game, &["e2e4"]);
        let fen = game.get_fen();
        assert!(game.load_fen("not a fen").is_err());
        assert_eq!(game.get_fen(), fen);
    }

    #[test]
    fn load_fen_reuses_keys_and_clears_history() {
        let mut game = GameState::new_game();
        let start_key = game.zobrist_key();
        play(&mut game, &["e2e4", "e7e5"]);

        game.load_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should load");
        assert!(game.san_history().is_empty());
        assert_eq!(game.undo(), None);
        assert_eq!(game.repetition_count(), 1);

        game.reset().expect("reset should succeed");
        assert_eq!(game.zobrist_key(), start_key);
    }

    #[test]
    fn make_move_annotates_and_undo_restores_everything() {
        let mut game = GameState::new_game();
        play(&mut game, &["e2e4", "d7d5"]);
        let fen = game.get_fen();
        let key = game.zobrist_key();

        let mv = game
            .make_move(MoveRequest::new(sq("e4"), sq("d5"), None))
            .expect("move generation should succeed")
            .expect("exd5 should be legal");
        assert_eq!(mv.san(), Some("exd5"));
        assert_eq!(mv.captured, Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert_eq!(game.san_history(), ["e4", "d5", "exd5"]);
        let played: Vec<String> = game.moves_played().map(Move::to_lan).collect();
        assert_eq!(played, ["e2e4", "d7d5", "e4d5"]);

        let undone = game.undo().expect("a move should be undone");
        assert_eq!(undone.to_lan(), "e4d5");
        assert_eq!(game.get_fen(), fen);
        assert_eq!(game.zobrist_key(), key);
        assert_eq!(game.san_history(), ["e4", "d5"]);
    }

    #[test]
    fn illegal_or_malformed_requests_return_none() {
        let mut game = GameState::new_game();
        let fen = game.get_fen();
        for text in ["e2e5", "e7e5", "zz", "e1e2", ""] {
            let result = game.make_move_lan(text).expect("rejection is not an error");
            assert!(result.is_none(), "{text:?} should be rejected");
        }
        assert_eq!(game.get_fen(), fen);
        assert!(game.san_history().is_empty());
    }

    #[test]
    fn promotion_without_piece_follows_config() {
        let fen = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1";

        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        let mv = game
            .make_move_lan("a7a8")
            .expect("move generation should succeed")
            .expect("default promotion should apply");
        assert_eq!(mv.promotion, Some(PieceKind::Queen));
        assert_eq!(mv.san(), Some("a8=Q+"));

        let strict = EngineConfig {
            default_promotion: None,
            ..EngineConfig::default()
        };
        let mut game = GameState::with_config(fen, strict).expect("FEN should parse");
        assert!(game
            .make_move_lan("a7a8")
            .expect("move generation should succeed")
            .is_none());
        assert!(game
            .make_move_lan("a7a8n")
            .expect("move generation should succeed")
            .is_some());
    }

    #[test]
    fn san_disambiguates_knights_reaching_the_same_square() {
        let fen = "4k3/8/8/8/8/8/8/1N1NK3 w - - 0 1";
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        play(&mut game, &["b1c3"]);
        assert_eq!(game.san_history(), ["Nbc3"]);

        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        play(&mut game, &["d1c3"]);
        assert_eq!(game.san_history(), ["Ndc3"]);
    }

    #[test]
    fn threefold_counts_non_consecutive_repeats() {
        let mut game = GameState::new_game();

        play(&mut game, &["g1f3", "g8f6", "f3g1", "f6g8"]);
        assert_eq!(game.repetition_count(), 2);
        assert!(!game.is_threefold_repetition());

        // a different shuffle returns to the start position a third time
        play(&mut game, &["b1c3", "b8c6", "c3b1"]);
        assert!(!game.is_threefold_repetition());
        play(&mut game, &["c6b8"]);
        assert_eq!(game.repetition_count(), 3);
        assert!(game.is_threefold_repetition());
    }

    #[test]
    fn threefold_is_reported_and_undone() {
        let mut game = GameState::new_game();
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        play(&mut game, &shuffle);
        play(&mut game, &shuffle[..3]);
        assert!(!game.is_threefold_repetition());

        play(&mut game, &shuffle[3..]);
        assert!(game.is_threefold_repetition());
        assert_eq!(game.status().expect("status should compute"), GameStatus::ThreefoldRepetition);

        game.undo().expect("a move should be undone");
        assert!(!game.is_threefold_repetition());
    }

    #[test]
    fn fifty_move_rule_tracks_the_halfmove_clock() {
        let mut game =
            GameState::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 99 80").expect("FEN should parse");
        assert!(!game.is_fifty_move_rule());

        play(&mut game, &["e1d1"]);
        assert!(game.is_fifty_move_rule());
        assert_eq!(game.status().expect("status should compute"), GameStatus::FiftyMoveRule);

        game.undo().expect("a move should be undone");
        play(&mut game, &["e2e4"]);
        assert_eq!(game.halfmove_clock(), 0);
        assert!(!game.is_fifty_move_rule());
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let mut game = GameState::new_game();
        play(&mut game, &["f2f3", "e7e5", "g2g4"]);
        let mate = game
            .make_move_lan("d8h4")
            .expect("move generation should succeed")
            .expect("Qh4 should be legal");

        let notes = mate.annotations.expect("played moves are annotated");
        assert_eq!(notes.san, "Qh4#");
        assert!(notes.check && notes.mate && !notes.stalemate);
        assert!(game.is_checkmate().expect("query should succeed"));
        assert!(!game.is_stalemate().expect("query should succeed"));
        assert_eq!(
            game.status().expect("status should compute"),
            GameStatus::Checkmate {
                winner: Color::Black
            }
        );
    }

    #[test]
    fn stalemate_is_flagged_on_the_move_that_causes_it() {
        let mut game = GameState::from_fen("7k/8/5Q2/6K1/8/8/8/8 w - - 0 1").expect("FEN should parse");
        let mv = game
            .make_move_lan("f6f7")
            .expect("move generation should succeed")
            .expect("Qf7 should be legal");
        let notes = mv.annotations.expect("played moves are annotated");
        assert!(notes.stalemate && !notes.check);
        assert_eq!(notes.san, "Qf7");
        assert!(game.is_stalemate().expect("query should succeed"));
        assert_eq!(game.status().expect("status should compute"), GameStatus::Stalemate);
    }

    #[test]
    fn legal_destinations_for_highlighting() {
        let mut game = GameState::new_game();
        let mut knight = game.legal_destinations(sq("g1")).expect("query should succeed");
        knight.sort_unstable();
        let mut expected = vec![sq("f3"), sq("h3")];
        expected.sort_unstable();
        assert_eq!(knight, expected);

        assert!(game
            .legal_destinations(sq("g8"))
            .expect("query should succeed")
            .is_empty());

        let mut game = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(
            game.legal_destinations(sq("a7")).expect("query should succeed"),
            vec![sq("a8")]
        );
    }

    #[test]
    fn board_matrix_reports_fen_letters() {
        let game = GameState::new_game();
        let matrix = game.board_matrix();
        assert_eq!(matrix[7][4], 'K');
        assert_eq!(matrix[0][3], 'q');
        assert_eq!(matrix[4][4], '.');
    }

    #[test]
    fn random_walk_keeps_every_invariant() {
        let mut rng = StdRng::seed_from_u64(0x5EED);

        for _ in 0..8 {
            let mut game = GameState::new_game();
            let start_fen = game.get_fen();
            let start_key = game.zobrist_key();
            let mut snapshots = Vec::new();

            for _ in 0..120 {
                let legal = game.legal_moves().expect("move generation should succeed");
                if legal.is_empty() {
                    break;
                }
                let pick = &legal[rng.random_range(0..legal.len())];
                snapshots.push((game.get_fen(), game.zobrist_key()));

                let request = MoveRequest::new(pick.from, pick.to, pick.promotion);
                game.make_move(request)
                    .expect("move generation should succeed")
                    .expect("a generated move should be accepted");

                assert_eq!(game.zobrist_key(), compute_zobrist_key(&game));
                assert_one_king_each(&game);
                assert!(!is_king_in_check(&game, game.side_to_move().opposite()));
            }

            while let Some((fen, key)) = snapshots.pop() {
                game.undo().expect("history should not be empty");
                assert_eq!(game.get_fen(), fen);
                assert_eq!(game.zobrist_key(), key);
                assert_one_king_each(&game);
            }

            assert_eq!(game.undo(), None);
            assert_eq!(game.get_fen(), start_fen);
            assert_eq!(game.zobrist_key(), start_key);
            assert_eq!(game.repetition_count(), 1);
        }
    }

    #[test]
    fn perft_and_pgn_are_reachable_from_the_facade() {
        let mut game = GameState::new_game();
        assert_eq!(game.perft(2).expect("perft should succeed"), 400);
        play(&mut game, &["e2e4"]);
        let pgn = game.export_pgn(&[("Event", "Club")]);
        assert!(pgn.contains("[Event \"Club\"]"));
        assert!(pgn.ends_with("1. e4 *"));
    }
}
