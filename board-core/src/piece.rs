use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, BoardResult};
use crate::images::{ImageLoader, ImageSet};

/// Side a piece belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    pub const ALL: [PieceColor; 2] = [PieceColor::White, PieceColor::Black];

    /// `true` maps to white, matching the page's boolean color flag.
    pub fn from_white(white: bool) -> Self {
        if white {
            PieceColor::White
        } else {
            PieceColor::Black
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceColor::White => "white",
            PieceColor::Black => "black",
        }
    }
}

/// Piece type. Discriminants are the fixed ordinals used for the name table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Rook = 1,
    Knight = 2,
    Bishop = 3,
    Queen = 4,
    King = 5,
}

const KIND_NAMES: [&str; 6] = ["pawn", "rook", "knight", "bishop", "queen", "king"];

impl PieceKind {
    /// All kinds in ordinal order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
    ];

    pub fn id(self) -> usize {
        self as usize
    }

    pub fn from_id(id: usize) -> Option<Self> {
        Self::ALL.get(id).copied()
    }

    pub fn name(self) -> &'static str {
        KIND_NAMES[self.id()]
    }
}

impl FromStr for PieceKind {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KIND_NAMES
            .iter()
            .position(|n| *n == s)
            .and_then(Self::from_id)
            .ok_or_else(|| BoardError::UnknownPieceKind(s.to_string()))
    }
}

/// A single immutable chess piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: PieceColor,
    pub kind: PieceKind,
}

impl Piece {
    pub fn new(color: PieceColor, kind: PieceKind) -> Self {
        Piece { color, kind }
    }

    /// Build from the page-level `(is_white, "type")` pair.
    pub fn from_parts(white: bool, kind: &str) -> BoardResult<Self> {
        Ok(Piece::new(PieceColor::from_white(white), kind.parse()?))
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.name()
    }

    /// Image-asset key, e.g. `white_king`.
    pub fn name(&self) -> String {
        format!("{}_{}", self.color.name(), self.type_name())
    }

    /// Cached image handle for this piece, loading the whole set on first use.
    pub fn image<'a, H, L>(&self, images: &'a mut ImageSet<H>, loader: &L) -> Option<&'a H>
    where
        L: ImageLoader<Handle = H> + ?Sized,
    {
        images.get_or_load(&self.name(), loader)
    }

    /// Every piece name the image set must cover, white first.
    pub fn all_names() -> Vec<String> {
        PieceColor::ALL
            .iter()
            .flat_map(|c| {
                PieceKind::ALL
                    .iter()
                    .map(move |k| Piece::new(*c, *k).name())
            })
            .collect()
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
