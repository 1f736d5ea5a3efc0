//! PGN export of a played game and SAN-based import for replay.
//!
//! Export writes the seven-tag roster (plus `SetUp`/`FEN` for games that did
//! not begin at the standard position) followed by numbered SAN move text.
//! Import replays SAN tokens against the legal move list, so anything it
//! accepts is a legal game.

use chrono::{DateTime, Utc};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::Color;
use crate::game_state::engine_config::EngineConfig;
use crate::game_state::game_state::GameState;
use crate::utils::long_algebraic::MoveRequest;
use crate::utils::san::{san_body, trim_san_suffix, SanPattern};

/// A game recovered from PGN text.
#[derive(Debug, Clone)]
pub struct PgnGame {
    /// Tag pairs in file order.
    pub tags: Vec<(String, String)>,
    /// State after replaying every move.
    pub game: GameState,
    pub result: String,
}

/// Export `game_state`'s history as PGN, dated today (UTC).
pub fn write_pgn(game_state: &GameState, tags: &[(&str, &str)]) -> String {
    write_pgn_dated(game_state, tags, Utc::now())
}

/// Export with an explicit date. Caller tags override defaults of the same
/// name in place and are otherwise appended in the given order.
pub fn write_pgn_dated(game_state: &GameState, tags: &[(&str, &str)], date: DateTime<Utc>) -> String {
    let mut roster: Vec<(String, String)> = vec![
        ("Event".to_owned(), "?".to_owned()),
        ("Site".to_owned(), "?".to_owned()),
        ("Date".to_owned(), date.format("%Y.%m.%d").to_string()),
        ("Round".to_owned(), "1".to_owned()),
        ("White".to_owned(), "White".to_owned()),
        ("Black".to_owned(), "Black".to_owned()),
        ("Result".to_owned(), "*".to_owned()),
    ];
    if game_state.initial_fen() != STARTING_POSITION_FEN {
        roster.push(("SetUp".to_owned(), "1".to_owned()));
        roster.push(("FEN".to_owned(), game_state.initial_fen().to_owned()));
    }

    for &(key, value) in tags {
        match roster.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_owned(),
            None => roster.push((key.to_owned(), value.to_owned())),
        }
    }

    let result = roster
        .iter()
        .find(|(k, _)| k == "Result")
        .map_or("*", |(_, v)| v.as_str())
        .to_owned();

    let header: Vec<String> = roster
        .iter()
        .map(|(k, v)| format!("[{k} \"{}\"]", escape_pgn_value(v)))
        .collect();

    let body = move_text(
        game_state.san_history(),
        game_state.initial_side_to_move(),
        game_state.initial_fullmove_number(),
    );

    let separator = if body.is_empty() { "" } else { " " };
    format!("{}\n\n{body}{separator}{result}", header.join("\n"))
}

fn move_text(sans: &[String], first_mover: Color, first_number: u16) -> String {
    let mut parts = Vec::with_capacity(sans.len());
    let mut number = first_number;
    let mut mover = first_mover;

    for (ply, san) in sans.iter().enumerate() {
        match mover {
            Color::White => parts.push(format!("{number}. {san}")),
            Color::Black if ply == 0 => parts.push(format!("{number}... {san}")),
            Color::Black => parts.push(san.clone()),
        }
        if mover == Color::Black {
            number = number.saturating_add(1);
        }
        mover = mover.opposite();
    }

    parts.join(" ")
}

/// Parse PGN text and replay its main line from the start position or the
/// `FEN` tag. Comments and variations are skipped.
pub fn read_pgn(text: &str, config: EngineConfig) -> ChessResult<PgnGame> {
    let mut tags = Vec::<(String, String)>::new();
    let mut movetext_lines = Vec::<&str>::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('[') {
            tags.push(parse_tag_line(trimmed)?);
        } else {
            movetext_lines.push(trimmed);
        }
    }

    let tag = |name: &str| tags.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str());
    let mut game = match tag("FEN") {
        Some(fen) => GameState::with_config(fen, config)?,
        None => GameState::with_config(STARTING_POSITION_FEN, config)?,
    };

    let mut result = tag("Result").unwrap_or("*").to_owned();
    let movetext = strip_comments_and_variations(&movetext_lines.join(" "));
    for token in movetext.split_whitespace() {
        if is_result_token(token) {
            result = token.to_owned();
            break;
        }

        let token = strip_move_number(token);
        if token.is_empty() {
            continue;
        }

        replay_san(&mut game, trim_san_suffix(token))?;
    }

    Ok(PgnGame { tags, game, result })
}

/// Play one SAN token. An exact match against the generated SAN wins;
/// otherwise the token is read loosely and must name exactly one legal move.
fn replay_san(game: &mut GameState, san: &str) -> ChessResult<()> {
    let legal = game.legal_moves()?;
    let mv = match legal.iter().find(|mv| san_body(mv, &legal) == san) {
        Some(mv) => mv,
        None => {
            let pattern = SanPattern::parse(san)
                .ok_or_else(|| ChessError::InvalidPgn(format!("unreadable move '{san}'")))?;
            let mut candidates = legal.iter().filter(|mv| pattern.matches(mv));
            match (candidates.next(), candidates.next()) {
                (Some(mv), None) => mv,
                (Some(_), Some(_)) => {
                    return Err(ChessError::InvalidPgn(format!("ambiguous move '{san}'")))
                }
                (None, _) => {
                    return Err(ChessError::InvalidPgn(format!("illegal or unknown move '{san}'")))
                }
            }
        }
    };
    let request = MoveRequest::new(mv.from, mv.to, mv.promotion);

    game.make_move(request)?
        .map(|_| ())
        .ok_or_else(|| ChessError::InvalidPgn(format!("move '{san}' was rejected")))
}

fn parse_tag_line(line: &str) -> ChessResult<(String, String)> {
    let invalid = || ChessError::InvalidPgn(format!("bad tag line: {line}"));

    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(invalid)?;
    let (key, raw_value) = inner.split_once(' ').ok_or_else(invalid)?;
    let value = raw_value
        .trim()
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(invalid)?;

    Ok((key.trim().to_owned(), value.replace("\\\"", "\"").replace("\\\\", "\\")))
}

fn strip_comments_and_variations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        match ch {
            '{' => brace_depth = brace_depth.saturating_add(1),
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' => paren_depth = paren_depth.saturating_add(1),
            ')' => paren_depth = paren_depth.saturating_sub(1),
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
        // keep tokens on either side of a skipped block apart
        if matches!(ch, '}' | ')') {
            out.push(' ');
        }
    }

    out
}

/// `12.e4` → `e4`, `12...` → ``, `e4` → `e4`.
fn strip_move_number(token: &str) -> &str {
    let digits = token.trim_start_matches(|c: char| c.is_ascii_digit());
    if digits.len() == token.len() {
        return token;
    }
    match digits.strip_prefix('.') {
        Some(rest) => rest.trim_start_matches('.'),
        None => token,
    }
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{read_pgn, strip_move_number, write_pgn, write_pgn_dated};
    use crate::chess_errors::ChessError;
    use crate::game_state::engine_config::EngineConfig;
    use crate::game_state::game_state::GameState;

    fn play(game: &mut GameState, lans: &[&str]) {
        for lan in lans {
            game.make_move_lan(lan)
                .expect("move generation should succeed")
                .expect("move should be legal");
        }
    }

    #[test]
    fn export_numbers_move_pairs_and_fills_roster() {
        let mut game = GameState::new_game();
        play(&mut game, &["e2e4", "e7e5", "g1f3"]);

        let date = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).single().expect("date should be valid");
        let pgn = write_pgn_dated(&game, &[("White", "Alice"), ("Annotator", "me")], date);

        let expected = "[Event \"?\"]\n[Site \"?\"]\n[Date \"2024.03.09\"]\n[Round \"1\"]\n\
                        [White \"Alice\"]\n[Black \"Black\"]\n[Result \"*\"]\n[Annotator \"me\"]\n\n\
                        1. e4 e5 2. Nf3 *";
        assert_eq!(pgn, expected);
    }

    #[test]
    fn empty_game_has_only_result_after_tags() {
        let game = GameState::new_game();
        let pgn = write_pgn(&game, &[("Result", "1/2-1/2")]);
        assert!(pgn.ends_with("[Result \"1/2-1/2\"]\n\n1/2-1/2"), "{pgn}");
        assert!(!pgn.contains("SetUp"));
    }

    #[test]
    fn custom_start_gets_setup_tags_and_black_numbering() {
        let fen = "4k3/8/8/8/8/8/4P3/4K3 b - - 0 7";
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        play(&mut game, &["e8d7", "e2e4", "d7c6"]);

        let pgn = write_pgn(&game, &[]);
        assert!(pgn.contains("[SetUp \"1\"]"));
        assert!(pgn.contains(&format!("[FEN \"{fen}\"]")));
        assert!(pgn.ends_with("\n\n7... Kd7 8. e4 Kc6 *"), "{pgn}");
    }

    #[test]
    fn mate_marker_and_result_survive_export() {
        let mut game = GameState::new_game();
        play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        let pgn = write_pgn(&game, &[("Result", "0-1")]);
        assert!(pgn.ends_with("1. f3 e5 2. g4 Qh4# 0-1"), "{pgn}");
    }

    #[test]
    fn import_replays_exported_game() {
        let mut game = GameState::new_game();
        play(
            &mut game,
            &["e2e4", "d7d5", "e4d5", "g8f6", "f1b5", "c7c6", "d5c6", "d8a5", "g1f3", "a5b5"],
        );
        let pgn = write_pgn(&game, &[("Event", "Casual \"blitz\"")]);

        let parsed = read_pgn(&pgn, EngineConfig::default()).expect("PGN should parse");
        assert_eq!(parsed.game.get_fen(), game.get_fen());
        assert_eq!(parsed.game.san_history(), game.san_history());
        assert_eq!(parsed.result, "*");
        assert!(parsed
            .tags
            .iter()
            .any(|(k, v)| k == "Event" && v == "Casual \"blitz\""));
    }

    #[test]
    fn import_skips_comments_and_variations() {
        let text = "[Event \"x\"]\n\n1. e4 {best by test} e5 (1... c5 2. Nf3) 2.Nf3 Nc6 1-0";
        let parsed = read_pgn(text, EngineConfig::default()).expect("PGN should parse");
        assert_eq!(parsed.game.san_history(), ["e4", "e5", "Nf3", "Nc6"]);
        assert_eq!(parsed.result, "1-0");
    }

    #[test]
    fn import_rejects_illegal_moves_and_bad_tags() {
        assert!(read_pgn("1. e5 *", EngineConfig::default()).is_err());
        assert!(read_pgn("[Event x]\n\n1. e4 *", EngineConfig::default()).is_err());
    }

    #[test]
    fn import_accepts_zero_castling_and_extra_disambiguation() {
        let text = "1. e4 e5 2. Ngf3 Nb8c6 3. Bc4 Bc5 4. 0-0 Nf6 5. d3 0-0 *";
        let parsed = read_pgn(text, EngineConfig::default()).expect("PGN should parse");
        assert_eq!(
            parsed.game.san_history(),
            ["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5", "O-O", "Nf6", "d3", "O-O"]
        );
    }

    #[test]
    fn import_rejects_ambiguous_moves() {
        let text = "[SetUp \"1\"]\n[FEN \"4k3/8/8/8/8/8/8/1N1NK3 w - - 0 1\"]\n\n1. Nc3 *";
        let err = read_pgn(text, EngineConfig::default()).expect_err("Nc3 is ambiguous");
        assert!(matches!(err, ChessError::InvalidPgn(_)));
    }

    #[test]
    fn move_number_prefixes_are_stripped() {
        assert_eq!(strip_move_number("12.e4"), "e4");
        assert_eq!(strip_move_number("3..."), "");
        assert_eq!(strip_move_number("3...Nf6"), "Nf6");
        assert_eq!(strip_move_number("Nf3"), "Nf3");
    }
}
