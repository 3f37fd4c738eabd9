//! UI layer for the desktop board: app shell, board widget, and theme.

pub mod app;
pub mod board;
pub mod theme;

pub use app::ChessGuiApp;
