//! Theme constants for the tic-tac-toe GUI

use egui::Color32;

// Board colors - slate paper
pub const BOARD_BG: Color32 = Color32::from_rgb(236, 232, 220);
pub const GRID_LINE: Color32 = Color32::from_rgb(60, 62, 70);

// Mark colors
pub const X_MARK: Color32 = Color32::from_rgb(200, 70, 60);
pub const O_MARK: Color32 = Color32::from_rgb(50, 100, 180);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(230, 180, 60);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 220, 50);

// Functions for colors that can't be const
pub fn hover_valid() -> Color32 {
    Color32::from_rgba_unmultiplied(80, 80, 80, 60)
}

pub fn suggestion_fill() -> Color32 {
    Color32::from_rgba_unmultiplied(50, 220, 50, 50)
}

pub fn faded(color: Color32) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 90)
}

// Panel colors - dark modern theme
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Timer colors
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(255, 180, 50);

// Sizes
pub const BOARD_MARGIN: f32 = 24.0;
pub const MARK_RADIUS_RATIO: f32 = 0.32;
pub const MARK_STROKE_WIDTH: f32 = 8.0;
pub const GRID_LINE_WIDTH: f32 = 4.0;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 5.0;
