//! Drag-and-drop chessboard widget.
//!
//! Renders a positional-notation string, tints the squares in the
//! highlight map, and reports a completed drag as a `(from, to)` pair.

use client_core::BoardState;
use eframe::egui;
use shared::{domain::Square, notation::Piece};

use crate::controller::reducer::PendingMove;
use crate::ui::theme;

const MIN_BOARD_SIZE: f32 = 240.0;
const MAX_BOARD_SIZE: f32 = 640.0;
const PENDING_ALPHA: f32 = 0.55;

pub struct DragState {
    from: Square,
    piece: Piece,
}

pub struct BoardWidget<'a> {
    state: &'a BoardState,
    pending: Option<&'a PendingMove>,
    drag: &'a mut Option<DragState>,
}

impl<'a> BoardWidget<'a> {
    pub fn new(
        state: &'a BoardState,
        pending: Option<&'a PendingMove>,
        drag: &'a mut Option<DragState>,
    ) -> Self {
        Self {
            state,
            pending,
            drag,
        }
    }

    /// Returns the drop completed this frame, if any.
    pub fn show(self, ui: &mut egui::Ui) -> Option<(Square, Square)> {
        let side = ui
            .available_size()
            .min_elem()
            .clamp(MIN_BOARD_SIZE, MAX_BOARD_SIZE);
        let (response, painter) =
            ui.allocate_painter(egui::vec2(side, side), egui::Sense::click_and_drag());
        let board = response.rect;
        let square_size = side / 8.0;
        let highlights = self.state.highlights();
        let placement = match self.state.position.placement() {
            Ok(placement) => placement,
            Err(err) => {
                painter.text(
                    board.center(),
                    egui::Align2::CENTER_CENTER,
                    format!("Unrenderable position: {err}"),
                    egui::FontId::proportional(14.0),
                    egui::Color32::RED,
                );
                return None;
            }
        };

        for rank in 0..8u8 {
            for file in 0..8u8 {
                let rect = square_rect(board, file, rank);
                let fill = if (file + rank) % 2 == 1 {
                    theme::LIGHT_SQUARE
                } else {
                    theme::DARK_SQUARE
                };
                painter.rect_filled(rect, egui::CornerRadius::ZERO, fill);
                let highlighted = Square::from_coords(file, rank)
                    .is_some_and(|square| highlights.contains_key(&square));
                if highlighted {
                    painter.rect_filled(rect, egui::CornerRadius::ZERO, theme::LAST_MOVE_HIGHLIGHT);
                }
            }
        }
        paint_coordinates(&painter, board, square_size);

        let dragged_from = self.drag.as_ref().map(|drag| drag.from.clone());
        let hidden: Vec<Square> = dragged_from
            .into_iter()
            .chain(self.pending.map(|pending| pending.from.clone()))
            .chain(self.pending.map(|pending| pending.to.clone()))
            .collect();
        for rank in 0..8u8 {
            for file in 0..8u8 {
                let Some(piece) = placement.piece_at(file, rank) else {
                    continue;
                };
                let skip = Square::from_coords(file, rank)
                    .is_some_and(|square| hidden.contains(&square));
                if !skip {
                    paint_piece(&painter, square_rect(board, file, rank).center(), square_size, piece, 1.0);
                }
            }
        }

        if let Some(pending) = self.pending {
            let moving = pending
                .from
                .coords()
                .and_then(|(file, rank)| placement.piece_at(file, rank));
            if let (Some(piece), Some((file, rank))) = (moving, pending.to.coords()) {
                paint_piece(
                    &painter,
                    square_rect(board, file, rank).center(),
                    square_size,
                    piece,
                    PENDING_ALPHA,
                );
            }
        }

        painter.rect_stroke(
            board,
            egui::CornerRadius::ZERO,
            egui::Stroke::new(2.0, theme::BOARD_BORDER),
            egui::StrokeKind::Outside,
        );

        if response.drag_started() {
            let grabbed = response
                .interact_pointer_pos()
                .and_then(|pos| square_at(board, pos))
                .and_then(|square| {
                    let (file, rank) = square.coords()?;
                    let piece = placement.piece_at(file, rank)?;
                    Some(DragState {
                        from: square,
                        piece,
                    })
                });
            *self.drag = grabbed;
        }

        let mut dropped = None;
        if response.drag_stopped() {
            if let Some(drag) = self.drag.take() {
                let released_at = response
                    .interact_pointer_pos()
                    .or_else(|| ui.ctx().pointer_latest_pos());
                if let Some(to) = released_at.and_then(|pos| square_at(board, pos)) {
                    dropped = Some((drag.from, to));
                }
            }
        }

        if let Some(drag) = self.drag.as_ref() {
            if let Some(pos) = ui.ctx().pointer_latest_pos() {
                paint_piece(&painter, pos, square_size, drag.piece, 1.0);
                ui.ctx().request_repaint();
            }
        }

        dropped
    }
}

/// `file` and `rank` are zero-based from `a1`; White is at the bottom.
pub fn square_rect(board: egui::Rect, file: u8, rank: u8) -> egui::Rect {
    let size = board.width() / 8.0;
    let min = egui::pos2(
        board.left() + f32::from(file) * size,
        board.top() + f32::from(7 - rank) * size,
    );
    egui::Rect::from_min_size(min, egui::vec2(size, size))
}

pub fn square_at(board: egui::Rect, pos: egui::Pos2) -> Option<Square> {
    if !board.contains(pos) {
        return None;
    }
    let size = board.width() / 8.0;
    let column = ((pos.x - board.left()) / size).floor() as i32;
    let row = ((pos.y - board.top()) / size).floor() as i32;
    if !(0..8).contains(&column) || !(0..8).contains(&row) {
        return None;
    }
    Square::from_coords(column as u8, (7 - row) as u8)
}

fn paint_piece(painter: &egui::Painter, center: egui::Pos2, square_size: f32, piece: Piece, alpha: f32) {
    let (fill, text) = match piece.side {
        shared::domain::Side::White => (theme::WHITE_PIECE_FILL, theme::WHITE_PIECE_TEXT),
        shared::domain::Side::Black => (theme::BLACK_PIECE_FILL, theme::BLACK_PIECE_TEXT),
    };
    painter.circle(
        center,
        square_size * 0.38,
        fill.gamma_multiply(alpha),
        egui::Stroke::new(1.5, theme::PIECE_OUTLINE.gamma_multiply(alpha)),
    );
    painter.text(
        center,
        egui::Align2::CENTER_CENTER,
        piece.notation_letter().to_ascii_uppercase(),
        egui::FontId::proportional(square_size * 0.42),
        text.gamma_multiply(alpha),
    );
}

fn paint_coordinates(painter: &egui::Painter, board: egui::Rect, square_size: f32) {
    let font = egui::FontId::monospace((square_size * 0.16).max(9.0));
    for index in 0..8u8 {
        let file_rect = square_rect(board, index, 0);
        painter.text(
            file_rect.right_bottom() - egui::vec2(3.0, 2.0),
            egui::Align2::RIGHT_BOTTOM,
            char::from(b'a' + index),
            font.clone(),
            theme::COORDINATE_TEXT,
        );
        let rank_rect = square_rect(board, 0, index);
        painter.text(
            rank_rect.left_top() + egui::vec2(3.0, 2.0),
            egui::Align2::LEFT_TOP,
            index + 1,
            font.clone(),
            theme::COORDINATE_TEXT,
        );
    }
}
