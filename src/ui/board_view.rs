//! Board rendering for the Isolation GUI

use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use super::theme::*;
use crate::{Board, Game, Player, Pos};

/// What the board view needs to know beyond the board itself
pub struct BoardOverlay<'a> {
    /// Legal destinations for the player to move
    pub legal_moves: &'a [Pos],
    /// Mark the legal destinations on the board
    pub show_legal_moves: bool,
    pub last_move: Option<Pos>,
    pub suggested_move: Option<Pos>,
    pub winner: Option<Player>,
    /// Accept clicks on legal cells
    pub interactive: bool,
}

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Grid drawing area, excluding the margin
    grid_rect: Rect,
    width: usize,
    height: usize,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 40.0,
            grid_rect: Rect::NOTHING,
            width: 0,
            height: 0,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked cell if it is a legal move
    pub fn show(&mut self, ui: &mut egui::Ui, board: &Board, overlay: &BoardOverlay<'_>) -> Option<Pos> {
        self.width = board.width();
        self.height = board.height();

        let available = ui.available_size();
        let cols = self.width as f32;
        let rows = self.height as f32;
        self.cell_size = ((available.x - 2.0 * BOARD_MARGIN) / cols)
            .min((available.y - 2.0 * BOARD_MARGIN) / rows)
            .max(8.0);

        let size = Vec2::new(
            cols * self.cell_size + 2.0 * BOARD_MARGIN,
            rows * self.cell_size + 2.0 * BOARD_MARGIN,
        );
        let (response, painter) = ui.allocate_painter(size, Sense::click());
        let board_rect = response.rect;
        self.grid_rect = board_rect.shrink(BOARD_MARGIN);

        painter.rect_filled(board_rect, CornerRadius::same(4), BOARD_BG);

        self.draw_cells(&painter, board);
        self.draw_coordinates(&painter);

        if overlay.show_legal_moves {
            for &pos in overlay.legal_moves {
                self.draw_legal_marker(&painter, pos);
            }
        }
        if let Some(pos) = overlay.last_move {
            self.draw_last_move_marker(&painter, pos);
        }
        for player in [Player::One, Player::Two] {
            if let Some(pos) = board.player_location(player) {
                self.draw_piece(&painter, pos, player, overlay.winner == Some(player));
            }
        }
        if let Some(pos) = overlay.suggested_move {
            self.draw_suggestion(&painter, pos, board.active_player());
        }

        if !overlay.interactive || overlay.winner.is_some() {
            return None;
        }

        let hovered = response.hover_pos().and_then(|p| self.screen_to_board(p))?;
        let is_valid = overlay.legal_moves.contains(&hovered);
        let color = if is_valid { hover_valid() } else { hover_invalid() };
        painter.rect_filled(self.cell_rect(hovered).shrink(2.0), CornerRadius::same(2), color);

        (response.clicked() && is_valid).then_some(hovered)
    }

    /// Draw checkered cells, blocked cells filled in
    fn draw_cells(&self, painter: &Painter, board: &Board) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        for pos in board.positions() {
            let rect = self.cell_rect(pos);
            let fill = if !board.is_blank(pos) {
                CELL_BLOCKED
            } else if (pos.row as usize + pos.col as usize) % 2 == 0 {
                CELL_LIGHT
            } else {
                CELL_DARK
            };
            painter.rect_filled(rect, CornerRadius::ZERO, fill);
            painter.rect_stroke(rect, CornerRadius::ZERO, stroke, egui::StrokeKind::Inside);
        }
    }

    /// Draw coordinate labels (columns A.., rows 0..)
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(12.0);

        for col in 0..self.width {
            let letter = (b'A' + (col % 26) as u8) as char;
            let x = self.grid_rect.min.x + (col as f32 + 0.5) * self.cell_size;
            let pos = Pos2::new(x, self.grid_rect.min.y - BOARD_MARGIN * 0.5);
            painter.text(pos, egui::Align2::CENTER_CENTER, letter, font.clone(), GRID_LINE);
        }

        for row in 0..self.height {
            let y = self.grid_rect.min.y + (row as f32 + 0.5) * self.cell_size;
            let pos = Pos2::new(self.grid_rect.min.x - BOARD_MARGIN * 0.5, y);
            painter.text(pos, egui::Align2::CENTER_CENTER, row.to_string(), font.clone(), GRID_LINE);
        }
    }

    /// Draw a player's piece with a simple highlight
    fn draw_piece(&self, painter: &Painter, pos: Pos, player: Player, winner: bool) {
        let center = self.cell_center(pos);
        let radius = self.cell_size * PIECE_RADIUS_RATIO;

        painter.circle_filled(
            center + Vec2::new(2.0, 2.0),
            radius,
            Color32::from_rgba_unmultiplied(0, 0, 0, 60),
        );
        painter.circle_filled(center, radius, player_color(player));
        painter.circle_filled(
            center + Vec2::new(-radius * 0.3, -radius * 0.3),
            radius * 0.2,
            player_highlight(player),
        );

        let label = match player {
            Player::One => "1",
            Player::Two => "2",
        };
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::proportional(radius),
            TEXT_PRIMARY,
        );

        if winner {
            painter.circle_stroke(center, radius + 3.0, Stroke::new(3.0, WIN_HIGHLIGHT));
        }
    }

    fn draw_legal_marker(&self, painter: &Painter, pos: Pos) {
        let radius = self.cell_size * LEGAL_MARKER_RADIUS_RATIO;
        painter.circle_filled(self.cell_center(pos), radius, legal_move_marker());
    }

    fn draw_last_move_marker(&self, painter: &Painter, pos: Pos) {
        let stroke = Stroke::new(3.0, LAST_MOVE_MARKER);
        painter.rect_stroke(
            self.cell_rect(pos).shrink(3.0),
            CornerRadius::same(2),
            stroke,
            egui::StrokeKind::Inside,
        );
    }

    /// Draw move suggestion
    fn draw_suggestion(&self, painter: &Painter, pos: Pos, player: Player) {
        let center = self.cell_center(pos);
        let radius = self.cell_size * PIECE_RADIUS_RATIO;
        let [r, g, b, _] = player_color(player).to_array();
        painter.circle_filled(center, radius, Color32::from_rgba_unmultiplied(r, g, b, 100));
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            "?",
            egui::FontId::proportional(14.0),
            TEXT_PRIMARY,
        );
    }

    fn cell_rect(&self, pos: Pos) -> Rect {
        let min = self.grid_rect.min
            + Vec2::new(pos.col as f32 * self.cell_size, pos.row as f32 * self.cell_size);
        Rect::from_min_size(min, Vec2::splat(self.cell_size))
    }

    fn cell_center(&self, pos: Pos) -> Pos2 {
        self.cell_rect(pos).center()
    }

    /// Convert screen coordinates to board position
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        if !self.grid_rect.contains(screen_pos) {
            return None;
        }
        let relative = screen_pos - self.grid_rect.min;
        let col = (relative.x / self.cell_size).floor() as usize;
        let row = (relative.y / self.cell_size).floor() as usize;

        (col < self.width && row < self.height).then(|| Pos::new(row as u8, col as u8))
    }
}
