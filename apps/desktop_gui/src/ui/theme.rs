use eframe::egui::Color32;

pub const LIGHT_SQUARE: Color32 = Color32::from_rgb(240, 217, 181);
pub const DARK_SQUARE: Color32 = Color32::from_rgb(181, 136, 99);
/// Yellow at 40% opacity, premultiplied.
pub const LAST_MOVE_HIGHLIGHT: Color32 = Color32::from_rgba_premultiplied(102, 102, 0, 102);
pub const BOARD_BORDER: Color32 = Color32::from_rgb(77, 77, 77);
pub const COORDINATE_TEXT: Color32 = Color32::from_rgb(90, 70, 50);

pub const WHITE_PIECE_FILL: Color32 = Color32::from_rgb(250, 250, 250);
pub const WHITE_PIECE_TEXT: Color32 = Color32::from_rgb(30, 30, 30);
pub const BLACK_PIECE_FILL: Color32 = Color32::from_rgb(35, 35, 35);
pub const BLACK_PIECE_TEXT: Color32 = Color32::from_rgb(245, 245, 245);
pub const PIECE_OUTLINE: Color32 = Color32::from_rgb(20, 20, 20);

pub const IN_PROGRESS_BANNER: Color32 = Color32::from_rgb(230, 255, 230);
pub const GAME_OVER_BANNER: Color32 = Color32::from_rgb(255, 235, 59);
pub const RESET_BUTTON: Color32 = Color32::from_rgb(76, 175, 80);
