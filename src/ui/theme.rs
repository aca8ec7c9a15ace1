//! Theme constants for the Isolation GUI

use egui::Color32;

use crate::Player;

// Board colors
pub const BOARD_BG: Color32 = Color32::from_rgb(222, 184, 135);
pub const CELL_LIGHT: Color32 = Color32::from_rgb(240, 217, 181);
pub const CELL_DARK: Color32 = Color32::from_rgb(181, 136, 99);
pub const CELL_BLOCKED: Color32 = Color32::from_rgb(70, 55, 45);
pub const GRID_LINE: Color32 = Color32::from_rgb(60, 40, 20);

// Piece colors
pub const PLAYER_ONE: Color32 = Color32::from_rgb(40, 110, 200);
pub const PLAYER_ONE_HIGHLIGHT: Color32 = Color32::from_rgb(120, 180, 250);
pub const PLAYER_TWO: Color32 = Color32::from_rgb(200, 60, 60);
pub const PLAYER_TWO_HIGHLIGHT: Color32 = Color32::from_rgb(250, 150, 150);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(250, 220, 60);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 220, 50);

pub fn legal_move_marker() -> Color32 {
    Color32::from_rgba_unmultiplied(40, 160, 80, 140)
}

pub fn hover_valid() -> Color32 {
    Color32::from_rgba_unmultiplied(40, 200, 90, 110)
}

pub fn hover_invalid() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 50, 50, 90)
}

pub fn player_color(player: Player) -> Color32 {
    match player {
        Player::One => PLAYER_ONE,
        Player::Two => PLAYER_TWO,
    }
}

pub fn player_highlight(player: Player) -> Color32 {
    match player {
        Player::One => PLAYER_ONE_HIGHLIGHT,
        Player::Two => PLAYER_TWO_HIGHLIGHT,
    }
}

// Panel text
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Timer colors
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(255, 180, 50);
pub const TIMER_CRITICAL: Color32 = Color32::from_rgb(255, 70, 70);

// Sizes
pub const BOARD_MARGIN: f32 = 30.0;
pub const PIECE_RADIUS_RATIO: f32 = 0.36;
pub const GRID_LINE_WIDTH: f32 = 1.0;
pub const LEGAL_MARKER_RADIUS_RATIO: f32 = 0.12;
