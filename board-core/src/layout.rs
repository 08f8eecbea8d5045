use serde::{Deserialize, Serialize};

use crate::board::{Board, DEFAULT_SIZE, Palette};
use crate::error::{BoardError, BoardResult};
use crate::piece::{Piece, PieceColor, PieceKind};

/// Where a piece sits: a linear index or a `[row, column]` pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Placement {
    Index(usize),
    Coord([usize; 2]),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub at: Placement,
    pub color: PieceColor,
    pub kind: PieceKind,
}

/// JSON description of a board to render.
///
/// Missing fields fall back to the defaults; a missing `pieces` list yields
/// the usual single white king.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BoardLayout {
    pub size: Option<usize>,
    pub width: Option<f64>,
    pub light: Option<String>,
    pub dark: Option<String>,
    pub pieces: Option<Vec<PlacedPiece>>,
}

impl BoardLayout {
    pub fn from_json(text: &str) -> BoardResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn palette(&self) -> Palette {
        let base = Palette::default();
        Palette {
            light: self.light.clone().unwrap_or(base.light),
            dark: self.dark.clone().unwrap_or(base.dark),
        }
    }

    pub fn build<H>(&self, default_width: f64) -> BoardResult<Board<H>> {
        let width = self.width.unwrap_or(default_width);
        let size = self.size.unwrap_or(DEFAULT_SIZE);
        let Some(pieces) = &self.pieces else {
            return Board::new(width, size, self.palette());
        };
        let mut board = Board::empty(width, size, self.palette())?;
        for p in pieces {
            let index = match p.at {
                Placement::Index(i) => i,
                Placement::Coord([row, column]) => board
                    .coord_to_index(row, column)
                    .ok_or(BoardError::SquareOutOfRange {
                        index: row
                            .checked_mul(size)
                            .and_then(|v| v.checked_add(column))
                            .unwrap_or(usize::MAX),
                        size,
                    })?,
            };
            board.place(index, Piece::new(p.color, p.kind))?;
        }
        Ok(board)
    }
}
