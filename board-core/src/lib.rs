//! Chessboard model and drawing routine shared by the browser front-end and
//! the off-screen renderer.

pub mod board;
pub mod error;
pub mod images;
pub mod layout;
pub mod piece;

pub use board::{Board, DEFAULT_DARK, DEFAULT_LIGHT, DEFAULT_SIZE, Palette, Surface};
pub use error::{BoardError, BoardResult};
pub use images::{ImageLoader, ImageSet};
pub use layout::{BoardLayout, PlacedPiece, Placement};
pub use piece::{Piece, PieceColor, PieceKind};
