//! Plain-text board for the terminal session.

use client_core::BoardState;
use shared::domain::Square;

const FILES: &str = "    a  b  c  d  e  f  g  h";

pub fn render_board(state: &BoardState) -> String {
    let placement = match state.position.placement() {
        Ok(placement) => placement,
        Err(err) => return format!("(unrenderable position '{}': {err})\n", state.position),
    };
    let highlights = state.highlights();

    let mut out = String::new();
    out.push_str(FILES);
    out.push('\n');
    for rank in (0..8u8).rev() {
        out.push_str(&format!(" {} ", rank + 1));
        for file in 0..8u8 {
            let symbol = placement
                .piece_at(file, rank)
                .map(|piece| piece.notation_letter())
                .unwrap_or('.');
            let highlighted = Square::from_coords(file, rank)
                .is_some_and(|square| highlights.contains_key(&square));
            if highlighted {
                out.push_str(&format!("[{symbol}]"));
            } else {
                out.push_str(&format!(" {symbol} "));
            }
        }
        out.push_str(&format!(" {}\n", rank + 1));
    }
    out.push_str(FILES);
    out.push('\n');
    out
}

pub fn render_summary(state: &BoardState) -> String {
    format!(
        "{}\nWhite score: {:.2}   Black score: {:.2}\nGame status: {}\n",
        state.headline(),
        state.scores.white,
        state.scores.black,
        state.status_message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::{LastMove, Scores};

    #[test]
    fn start_position_renders_black_on_top() {
        let board = render_board(&BoardState::initial(Scores::default()));
        let lines: Vec<&str> = board.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[1], " 8  r  n  b  q  k  b  n  r  8");
        assert_eq!(lines[8], " 1  R  N  B  Q  K  B  N  R  1");
        assert_eq!(lines[4], " 5  .  .  .  .  .  .  .  .  5");
    }

    #[test]
    fn last_move_squares_are_bracketed() {
        let mut state = BoardState::initial(Scores::default());
        state.last_move = Some(LastMove::new(Square::from("a1"), Square::from("h8")));
        let board = render_board(&state);
        let lines: Vec<&str> = board.lines().collect();
        assert!(lines[1].ends_with("[r] 8"), "{}", lines[1]);
        assert!(lines[8].starts_with(" 1 [R]"), "{}", lines[8]);
    }

    #[test]
    fn summary_shows_scores_with_two_decimals() {
        let state = BoardState::initial(Scores::new(38.0, 37.25));
        let summary = render_summary(&state);
        assert!(summary.contains("Current turn: White"));
        assert!(summary.contains("White score: 38.00"));
        assert!(summary.contains("Black score: 37.25"));
    }
}
