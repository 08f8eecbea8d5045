use thiserror::Error;

/// Errors raised while building or populating a board.
#[derive(Error, Debug)]
pub enum BoardError {
    /// Piece type name outside pawn/rook/knight/bishop/queen/king.
    #[error("unknown piece type: {0}")]
    UnknownPieceKind(String),

    #[error("square {index} is outside a {size}x{size} board")]
    SquareOutOfRange { index: usize, size: usize },

    #[error("board size must be at least 1 and fit size² squares, got {0}")]
    InvalidSize(usize),

    /// Layout file could not be parsed.
    #[error("layout parse error: {0}")]
    Layout(#[from] serde_json::Error),
}

pub type BoardResult<T> = Result<T, BoardError>;
