use super::*;

const START_GRID: &str = "RNBQKBNR\nPPPPPPPP\n........\n........\n........\n........\npppppppp\nrnbqkbnr\n";

fn expand_group(group: &str) -> String {
    group
        .chars()
        .map(|symbol| match symbol.to_digit(10) {
            Some(run) => ".".repeat(run as usize),
            None => invert_case(symbol).to_string(),
        })
        .collect()
}

#[test]
fn all_empty_row_transcodes_to_single_run() {
    assert_eq!(transcode_row("........").expect("row"), "8");
}

#[test]
fn leading_pieces_are_inverted_and_trailing_run_flushed() {
    assert_eq!(transcode_row("KQ......").expect("row"), "kq6");
}

#[test]
fn runs_flush_between_pieces() {
    assert_eq!(transcode_row(".p..K..r").expect("row"), "1P2k2R");
    assert_eq!(transcode_row("r......R").expect("row"), "R6r");
}

#[test]
fn transcoded_rows_expand_back_to_the_input_row() {
    let rows = [
        "........",
        "KQ......",
        "......kq",
        ".p.P.n.N",
        "rnbqkbnr",
        "...K....",
        "P.......",
        ".......b",
    ];
    for row in rows {
        let group = transcode_row(row).expect("row");
        assert_eq!(expand_group(&group), row, "group {group}");
    }
}

#[test]
fn rejects_rows_of_the_wrong_length() {
    assert_eq!(
        transcode_row("......."),
        Err(NotationError::RowLength { row: 0, squares: 7 })
    );
    assert_eq!(
        transcode_row(".........").unwrap_err(),
        NotationError::RowLength { row: 0, squares: 9 }
    );
}

#[test]
fn rejects_unknown_square_characters() {
    assert_eq!(
        transcode_row("...x...."),
        Err(NotationError::UnexpectedSquare { row: 0, found: 'x' })
    );
}

#[test]
fn grid_transcodes_to_start_occupancy() {
    assert_eq!(
        transcode_grid(START_GRID).expect("grid"),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
    );
}

#[test]
fn grid_ignores_blank_rows_and_carriage_returns() {
    let grid = START_GRID.replace('\n', "\r\n\n  \n");
    assert_eq!(
        transcode_grid(&grid).expect("grid"),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
    );
}

#[test]
fn grid_reports_failing_row_index() {
    let grid = START_GRID.replace("pppppppp", "ppp?pppp");
    assert_eq!(
        transcode_grid(&grid),
        Err(NotationError::UnexpectedSquare { row: 6, found: '?' })
    );
}

#[test]
fn grid_with_missing_rank_is_rejected() {
    let grid = "........\n".repeat(7);
    assert_eq!(transcode_grid(&grid), Err(NotationError::RankCount(7)));
}

#[test]
fn position_from_grid_appends_side_and_fixed_trailer() {
    let position = Position::from_grid(START_GRID, Side::Black).expect("position");
    assert_eq!(
        position.as_str(),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1"
    );
    assert_eq!(position.side_to_move(), Some(Side::Black));
}

#[test]
fn start_position_places_kings_on_e_file() {
    let placement = Position::start().placement().expect("placement");
    assert_eq!(
        placement.piece_at(4, 0),
        Some(Piece {
            side: Side::White,
            kind: PieceKind::King
        })
    );
    assert_eq!(
        placement.piece_at(4, 7),
        Some(Piece {
            side: Side::Black,
            kind: PieceKind::King
        })
    );
    assert_eq!(placement.piece_at(4, 3), None);
}

#[test]
fn parse_accepts_start_and_rejects_short_ranks() {
    assert_eq!(
        Position::parse(START_POSITION).expect("start"),
        Position::start()
    );
    assert_eq!(
        Position::parse("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
        Err(NotationError::RowLength { row: 1, squares: 7 })
    );
    assert_eq!(
        Position::parse("8/8/8/8/8/8/8/8 x"),
        Err(NotationError::InvalidSideToMove("x".to_string()))
    );
    assert_eq!(
        Position::parse("8/8/8/8/8/8/8/8"),
        Err(NotationError::MissingField("side to move"))
    );
}

#[test]
fn piece_letters_follow_notation_case() {
    let piece = Piece::from_notation('n').expect("knight");
    assert_eq!(piece.side, Side::Black);
    assert_eq!(piece.notation_letter(), 'n');
    assert!(Piece::from_notation('x').is_none());
}
