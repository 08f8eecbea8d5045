use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, BoardResult};
use crate::images::{ImageLoader, ImageSet};
use crate::piece::{Piece, PieceColor, PieceKind};

/// Grid dimension used when none is given.
pub const DEFAULT_SIZE: usize = 8;
/// Linear index of the piece every fresh board starts with.
pub const STARTING_KING_INDEX: usize = 1;

pub const DEFAULT_LIGHT: &str = "#f0d9b5";
pub const DEFAULT_DARK: &str = "#b58863";

/// Anything a board can paint onto: a browser canvas, an SVG document, or a
/// recorder in tests.
pub trait Surface {
    type Image;

    fn fill_rect(&mut self, color: &str, x: f64, y: f64, w: f64, h: f64);

    /// Draw `image` scaled into the given rectangle.
    fn draw_image(&mut self, image: &Self::Image, x: f64, y: f64, w: f64, h: f64);
}

/// Light and dark square colors. Values are opaque color strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub light: String,
    pub dark: String,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            light: DEFAULT_LIGHT.to_string(),
            dark: DEFAULT_DARK.to_string(),
        }
    }
}

impl Palette {
    pub fn new(light: impl Into<String>, dark: impl Into<String>) -> Self {
        Palette {
            light: light.into(),
            dark: dark.into(),
        }
    }
}

/// Square board of `size × size` cells drawn into a `width × width` surface.
///
/// Occupancy is keyed by linear index (`row * size + column`); the ordered map
/// keeps redraws in ascending index order.
#[derive(Debug)]
pub struct Board<H> {
    width: f64,
    size: usize,
    palette: Palette,
    pieces: BTreeMap<usize, Piece>,
    images: ImageSet<H>,
}

impl<H> Board<H> {
    /// Empty board with no pieces placed.
    pub fn empty(width: f64, size: usize, palette: Palette) -> BoardResult<Self> {
        // size² must be representable as a linear index
        if size == 0 || size.checked_mul(size).is_none() {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Board {
            width,
            size,
            palette,
            pieces: BTreeMap::new(),
            images: ImageSet::new(),
        })
    }

    /// Board with the starting white king at index 1.
    pub fn new(width: f64, size: usize, palette: Palette) -> BoardResult<Self> {
        let mut board = Self::empty(width, size, palette)?;
        board.place(
            STARTING_KING_INDEX,
            Piece::new(PieceColor::White, PieceKind::King),
        )?;
        Ok(board)
    }

    pub fn with_default_size(width: f64, palette: Palette) -> BoardResult<Self> {
        Self::new(width, DEFAULT_SIZE, palette)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn images(&self) -> &ImageSet<H> {
        &self.images
    }

    /// Pixel edge of one cell.
    pub fn square_size(&self) -> f64 {
        self.width / self.size as f64
    }

    pub fn square_count(&self) -> usize {
        self.size * self.size
    }

    /// `(row, column)` of a linear index.
    pub fn index_to_coord(&self, index: usize) -> (usize, usize) {
        (index / self.size, index % self.size)
    }

    pub fn coord_to_index(&self, row: usize, column: usize) -> Option<usize> {
        (row < self.size && column < self.size).then(|| row * self.size + column)
    }

    pub fn is_light(row: usize, column: usize) -> bool {
        (row + column) % 2 == 0
    }

    pub fn square_color(&self, row: usize, column: usize) -> &str {
        if Self::is_light(row, column) {
            &self.palette.light
        } else {
            &self.palette.dark
        }
    }

    /// Put `piece` on `index`, returning whatever stood there before.
    pub fn place(&mut self, index: usize, piece: Piece) -> BoardResult<Option<Piece>> {
        if index >= self.square_count() {
            return Err(BoardError::SquareOutOfRange {
                index,
                size: self.size,
            });
        }
        Ok(self.pieces.insert(index, piece))
    }

    pub fn remove(&mut self, index: usize) -> Option<Piece> {
        self.pieces.remove(&index)
    }

    pub fn piece_at(&self, index: usize) -> Option<&Piece> {
        self.pieces.get(&index)
    }

    /// Occupied squares in ascending index order.
    pub fn pieces(&self) -> impl Iterator<Item = (usize, &Piece)> {
        self.pieces.iter().map(|(i, p)| (*i, p))
    }

    /// Image names the placed pieces draw with, each once.
    pub fn placed_names(&self) -> BTreeSet<String> {
        self.pieces.values().map(Piece::name).collect()
    }

    /// Fill every cell with its light or dark color.
    pub fn draw_board<S>(&self, surface: &mut S)
    where
        S: Surface + ?Sized,
    {
        let sq = self.square_size();
        for column in 0..self.size {
            for row in 0..self.size {
                surface.fill_rect(
                    self.square_color(row, column),
                    column as f64 * sq,
                    row as f64 * sq,
                    sq,
                    sq,
                );
            }
        }
    }

    /// Draw each occupying piece's image scaled to its cell.
    pub fn draw_pieces<S, L>(&mut self, surface: &mut S, loader: &L)
    where
        S: Surface<Image = H> + ?Sized,
        L: ImageLoader<Handle = H> + ?Sized,
    {
        let sq = self.square_size();
        let size = self.size;
        let Board { pieces, images, .. } = self;
        for (&index, piece) in pieces.iter() {
            let (row, column) = (index / size, index % size);
            if let Some(img) = piece.image(images, loader) {
                surface.draw_image(img, column as f64 * sq, row as f64 * sq, sq, sq);
            }
        }
    }

    /// Full frame: grid first, pieces on top.
    pub fn draw<S, L>(&mut self, surface: &mut S, loader: &L)
    where
        S: Surface<Image = H> + ?Sized,
        L: ImageLoader<Handle = H> + ?Sized,
    {
        self.draw_board(surface);
        self.draw_pieces(surface, loader);
    }

    /// Take freshly read colors and repaint in place. The grid fill covers
    /// the previous frame entirely, so nothing is cleared first.
    pub fn update<S, L>(&mut self, palette: Palette, surface: &mut S, loader: &L)
    where
        S: Surface<Image = H> + ?Sized,
        L: ImageLoader<Handle = H> + ?Sized,
    {
        self.palette = palette;
        self.draw(surface, loader);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Op {
        Fill {
            color: String,
            x: f64,
            y: f64,
            w: f64,
            h: f64,
        },
        Image {
            name: String,
            x: f64,
            y: f64,
            w: f64,
            h: f64,
        },
    }

    #[derive(Default)]
    pub struct Recorder {
        pub ops: Vec<Op>,
    }

    impl Surface for Recorder {
        type Image = String;

        fn fill_rect(&mut self, color: &str, x: f64, y: f64, w: f64, h: f64) {
            self.ops.push(Op::Fill {
                color: color.to_string(),
                x,
                y,
                w,
                h,
            });
        }

        fn draw_image(&mut self, image: &String, x: f64, y: f64, w: f64, h: f64) {
            self.ops.push(Op::Image {
                name: image.clone(),
                x,
                y,
                w,
                h,
            });
        }
    }

    pub struct NameLoader;

    impl ImageLoader for NameLoader {
        type Handle = String;

        fn load(&self, name: &str) -> Option<String> {
            Some(name.to_string())
        }
    }

    fn fill_at(ops: &[Op], sq: f64, row: usize, column: usize) -> Option<&str> {
        ops.iter().find_map(|op| match op {
            Op::Fill { color, x, y, .. }
                if *x == column as f64 * sq && *y == row as f64 * sq =>
            {
                Some(color.as_str())
            }
            _ => None,
        })
    }

    #[test]
    fn square_size_is_width_over_size() {
        for size in 1..=12 {
            for width in [600.0, 480.0, 333.0, 1.0] {
                let board: Board<String> = Board::empty(width, size, Palette::default()).unwrap();
                assert_eq!(board.square_size(), width / size as f64);
            }
        }
    }

    #[test]
    fn grid_tiles_surface_without_gaps_or_overlaps() {
        for size in [1usize, 2, 3, 7, 8, 10] {
            let width = 600.0;
            let board: Board<String> = Board::empty(width, size, Palette::default()).unwrap();
            let mut rec = Recorder::default();
            board.draw_board(&mut rec);
            assert_eq!(rec.ops.len(), size * size);

            let sq = board.square_size();
            let mut seen = vec![false; size * size];
            for op in &rec.ops {
                let Op::Fill { x, y, w, h, .. } = op else {
                    panic!("unexpected op {op:?}");
                };
                assert_eq!((*w, *h), (sq, sq));
                let column = (x / sq).round() as usize;
                let row = (y / sq).round() as usize;
                assert!(row < size && column < size);
                assert!(!seen[row * size + column], "cell drawn twice");
                seen[row * size + column] = true;
                assert!(x + w <= width + 1e-9 && y + h <= width + 1e-9);
            }
            assert!(seen.iter().all(|s| *s));
        }
    }

    #[test]
    fn colors_alternate_from_light_corner() {
        let board: Board<String> =
            Board::with_default_size(600.0, Palette::new("white", "black")).unwrap();
        assert_eq!(board.square_color(0, 0), "white");
        assert_eq!(board.square_color(0, 1), "black");
        assert_eq!(board.square_color(1, 0), "black");
        assert_eq!(board.square_color(7, 7), "white");

        let mut rec = Recorder::default();
        board.draw_board(&mut rec);
        let sq = board.square_size();
        assert_eq!(fill_at(&rec.ops, sq, 0, 0), Some("white"));
        assert_eq!(fill_at(&rec.ops, sq, 0, 1), Some("black"));
        assert_eq!(fill_at(&rec.ops, sq, 7, 7), Some("white"));
    }

    #[test]
    fn index_to_coord_on_default_board() {
        let board: Board<String> = Board::with_default_size(600.0, Palette::default()).unwrap();
        assert_eq!(board.index_to_coord(0), (0, 0));
        assert_eq!(board.index_to_coord(9), (1, 1));
        assert_eq!(board.index_to_coord(63), (7, 7));
        assert_eq!(board.coord_to_index(1, 1), Some(9));
        assert_eq!(board.coord_to_index(8, 0), None);
    }

    #[test]
    fn new_board_holds_one_white_king_at_index_one() {
        let board: Board<String> = Board::with_default_size(600.0, Palette::default()).unwrap();
        let placed: Vec<_> = board.pieces().collect();
        assert_eq!(placed.len(), 1);
        let (index, piece) = placed[0];
        assert_eq!(index, 1);
        assert_eq!(board.index_to_coord(index), (0, 1));
        assert_eq!(piece.name(), "white_king");
    }

    #[test]
    fn piece_is_drawn_over_its_square() {
        let mut board = Board::with_default_size(600.0, Palette::default()).unwrap();
        let mut rec = Recorder::default();
        board.draw(&mut rec, &NameLoader);
        assert_eq!(rec.ops.len(), 65);
        assert_eq!(
            rec.ops.last(),
            Some(&Op::Image {
                name: "white_king".to_string(),
                x: 75.0,
                y: 0.0,
                w: 75.0,
                h: 75.0,
            })
        );
        let fill_pos = rec
            .ops
            .iter()
            .position(|op| matches!(op, Op::Fill { x, y, .. } if *x == 75.0 && *y == 0.0));
        assert!(fill_pos.is_some_and(|p| p < rec.ops.len() - 1));
    }

    #[test]
    fn update_repaints_with_new_colors() {
        let mut board = Board::with_default_size(400.0, Palette::new("#eee", "#333")).unwrap();
        let mut first = Recorder::default();
        board.draw(&mut first, &NameLoader);

        let mut second = Recorder::default();
        board.update(Palette::new("ivory", "teal"), &mut second, &NameLoader);
        assert_eq!(second.ops.len(), first.ops.len());
        for op in &second.ops {
            if let Op::Fill { color, .. } = op {
                assert!(color == "ivory" || color == "teal", "stale color {color}");
            }
        }
        assert_eq!(board.palette(), &Palette::new("ivory", "teal"));

        let mut third = Recorder::default();
        board.update(Palette::new("ivory", "teal"), &mut third, &NameLoader);
        assert_eq!(second.ops, third.ops);
    }

    #[test]
    fn pieces_redraw_in_index_order() {
        let mut board = Board::empty(800.0, 8, Palette::default()).unwrap();
        board
            .place(40, Piece::new(PieceColor::Black, PieceKind::Queen))
            .unwrap();
        board
            .place(3, Piece::new(PieceColor::White, PieceKind::Rook))
            .unwrap();
        board
            .place(17, Piece::new(PieceColor::Black, PieceKind::Knight))
            .unwrap();

        let names = |rec: &Recorder| -> Vec<String> {
            rec.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Image { name, .. } => Some(name.clone()),
                    _ => None,
                })
                .collect()
        };
        let mut a = Recorder::default();
        board.draw_pieces(&mut a, &NameLoader);
        let mut b = Recorder::default();
        board.update(Palette::default(), &mut b, &NameLoader);
        assert_eq!(names(&a), vec!["white_rook", "black_knight", "black_queen"]);
        assert_eq!(names(&a), names(&b));
    }

    #[test]
    fn placed_names_cover_only_pieces_on_the_board() {
        let mut board: Board<String> = Board::new(600.0, 8, Palette::default()).unwrap();
        assert_eq!(
            board.placed_names().into_iter().collect::<Vec<_>>(),
            vec!["white_king"]
        );
        board
            .place(10, Piece::new(PieceColor::Black, PieceKind::Pawn))
            .unwrap();
        board
            .place(11, Piece::new(PieceColor::Black, PieceKind::Pawn))
            .unwrap();
        assert_eq!(
            board.placed_names().into_iter().collect::<Vec<_>>(),
            vec!["black_pawn", "white_king"]
        );
    }

    #[test]
    fn oversized_grid_is_rejected() {
        assert!(matches!(
            Board::<String>::new(600.0, 5_000_000_000, Palette::default()),
            Err(BoardError::InvalidSize(5_000_000_000))
        ));
        assert!(matches!(
            Board::<String>::empty(600.0, usize::MAX, Palette::default()),
            Err(BoardError::InvalidSize(usize::MAX))
        ));
    }

    #[test]
    fn placement_outside_grid_is_rejected() {
        let mut board: Board<String> = Board::empty(600.0, 8, Palette::default()).unwrap();
        let err = board
            .place(64, Piece::new(PieceColor::White, PieceKind::Pawn))
            .unwrap_err();
        assert!(matches!(err, BoardError::SquareOutOfRange { index: 64, size: 8 }));
        assert!(matches!(
            Board::<String>::empty(600.0, 0, Palette::default()),
            Err(BoardError::InvalidSize(0))
        ));
        assert!(Board::<String>::new(600.0, 1, Palette::default()).is_err());
    }
}
