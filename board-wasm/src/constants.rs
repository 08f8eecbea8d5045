//! Page-level constants shared with `web/index.html`.

/// Edge of the square canvas in pixels.
pub const CANVAS_SIZE: u32 = 600;
pub const CANVAS_ID: &str = "board";
pub const BOARD_CONTAINER_ID: &str = "chess-board-container";
pub const LIGHT_INPUT_ID: &str = "lightColor";
pub const DARK_INPUT_ID: &str = "darkColor";
/// Directory holding one `<color>_<type>.svg` per piece, relative to the base URL.
pub const IMAGE_DIR: &str = "images";
