//! Pieces module - the static piece catalog
//!
//! Seven variants, each with four `dimension x dimension` rotation bitmaps.
//! Everything derived from the bitmaps (occupied offsets, empty border
//! spacing, spawn offset) is computed in `const` context, so a malformed
//! bitmap is a compile error rather than a runtime surprise.

use crate::types::{PieceKind, Rgb, Rotation};

/// Offset of a single occupied cell inside the rotation bitmap: (column, row)
pub type MinoOffset = (i8, i8);

/// Shape of a piece - the 4 occupied offsets of one rotation state
pub type PieceShape = [MinoOffset; 4];

/// Largest bounding box of any variant (the I piece)
pub const MAX_DIMENSION: usize = 4;

/// Number of occupied cells in every rotation state
pub const CELLS_PER_PIECE: usize = 4;

type Bitmap = [[bool; MAX_DIMENSION]; MAX_DIMENSION];

const MIN_SHADE: u8 = 35;
const MAX_SHADE: u8 = 255 - MIN_SHADE;

/// Fully-empty border rows/columns of one rotation bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Spacing {
    pub left: i8,
    pub right: i8,
    pub top: i8,
    pub bottom: i8,
}

/// Immutable definition of one piece variant
#[derive(Debug)]
pub struct PieceDef {
    kind: PieceKind,
    dimension: i8,
    num_columns: i8,
    num_rows: i8,
    color: Rgb,
    bitmaps: [Bitmap; 4],
    shapes: [PieceShape; 4],
    spacing: [Spacing; 4],
    spawn_column: i8,
    spawn_row: i8,
}

impl PieceDef {
    const fn new(
        kind: PieceKind,
        color: Rgb,
        dimension: usize,
        num_columns: i8,
        num_rows: i8,
        rotations: [&[&str]; 4],
    ) -> Self {
        assert!(dimension >= 2 && dimension <= MAX_DIMENSION);

        let mut bitmaps = [[[false; MAX_DIMENSION]; MAX_DIMENSION]; 4];
        let mut shapes = [[(0, 0); CELLS_PER_PIECE]; 4];
        let mut spacing = [Spacing {
            left: 0,
            right: 0,
            top: 0,
            bottom: 0,
        }; 4];

        let mut r = 0;
        while r < 4 {
            bitmaps[r] = parse_bitmap(rotations[r], dimension);
            shapes[r] = collect_shape(&bitmaps[r], dimension);
            spacing[r] = Spacing {
                left: space_left(&bitmaps[r], dimension),
                right: space_right(&bitmaps[r], dimension),
                top: space_top(&bitmaps[r], dimension),
                bottom: space_bottom(&bitmaps[r], dimension),
            };
            assert!(
                spacing[r].left >= 0
                    && spacing[r].right >= 0
                    && spacing[r].top >= 0
                    && spacing[r].bottom >= 0,
                "rotation bitmap has no occupied cell"
            );
            r += 1;
        }

        let dimension = dimension as i8;
        Self {
            kind,
            dimension,
            num_columns,
            num_rows,
            color,
            bitmaps,
            shapes,
            spacing,
            spawn_column: 5 - dimension / 2,
            spawn_row: spacing[0].top,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Side length of the square rotation bitmaps (2, 3 or 4)
    pub fn dimension(&self) -> i8 {
        self.dimension
    }

    /// Width of the minimal bounding box in the spawn orientation
    pub fn num_columns(&self) -> i8 {
        self.num_columns
    }

    /// Height of the minimal bounding box in the spawn orientation
    pub fn num_rows(&self) -> i8 {
        self.num_rows
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn lighter(&self) -> Rgb {
        self.color.brighter()
    }

    pub fn darker(&self) -> Rgb {
        self.color.darker()
    }

    /// Whether bitmap cell `(x, y)` of `rotation` is occupied.
    ///
    /// `x` and `y` must lie in `[0, dimension)`.
    pub fn is_cell_occupied(&self, rotation: Rotation, x: i8, y: i8) -> bool {
        debug_assert!(
            (0..self.dimension).contains(&x) && (0..self.dimension).contains(&y),
            "bitmap cell ({}, {}) outside {}x{}",
            x,
            y,
            self.dimension,
            self.dimension
        );
        self.bitmaps[rotation.index() as usize][y as usize][x as usize]
    }

    /// The four occupied offsets of `rotation`, in row-major order
    pub fn shape(&self, rotation: Rotation) -> PieceShape {
        self.shapes[rotation.index() as usize]
    }

    pub fn spacing(&self, rotation: Rotation) -> Spacing {
        self.spacing[rotation.index() as usize]
    }

    pub fn spawn_column(&self) -> i8 {
        self.spawn_column
    }

    pub fn spawn_row(&self) -> i8 {
        self.spawn_row
    }
}

const fn parse_bitmap(rows: &[&str], dimension: usize) -> Bitmap {
    assert!(rows.len() == dimension, "bitmap row count must equal dimension");
    let mut out = [[false; MAX_DIMENSION]; MAX_DIMENSION];
    let mut y = 0;
    while y < dimension {
        let bytes = rows[y].as_bytes();
        assert!(bytes.len() == dimension, "bitmap row width must equal dimension");
        let mut x = 0;
        while x < dimension {
            out[y][x] = bytes[x] == b'#';
            x += 1;
        }
        y += 1;
    }
    out
}

const fn collect_shape(bitmap: &Bitmap, dimension: usize) -> PieceShape {
    let mut out = [(0, 0); CELLS_PER_PIECE];
    let mut n = 0;
    let mut y = 0;
    while y < dimension {
        let mut x = 0;
        while x < dimension {
            if bitmap[y][x] {
                assert!(n < CELLS_PER_PIECE, "rotation bitmap has more than 4 cells");
                out[n] = (x as i8, y as i8);
                n += 1;
            }
            x += 1;
        }
        y += 1;
    }
    assert!(n == CELLS_PER_PIECE, "rotation bitmap has fewer than 4 cells");
    out
}

const fn column_occupied(bitmap: &Bitmap, dimension: usize, x: usize) -> bool {
    let mut y = 0;
    while y < dimension {
        if bitmap[y][x] {
            return true;
        }
        y += 1;
    }
    false
}

const fn row_occupied(bitmap: &Bitmap, dimension: usize, y: usize) -> bool {
    let mut x = 0;
    while x < dimension {
        if bitmap[y][x] {
            return true;
        }
        x += 1;
    }
    false
}

const fn space_left(bitmap: &Bitmap, dimension: usize) -> i8 {
    let mut x = 0;
    while x < dimension {
        if column_occupied(bitmap, dimension, x) {
            return x as i8;
        }
        x += 1;
    }
    -1
}

const fn space_right(bitmap: &Bitmap, dimension: usize) -> i8 {
    let mut x = dimension;
    while x > 0 {
        x -= 1;
        if column_occupied(bitmap, dimension, x) {
            return (dimension - 1 - x) as i8;
        }
    }
    -1
}

const fn space_top(bitmap: &Bitmap, dimension: usize) -> i8 {
    let mut y = 0;
    while y < dimension {
        if row_occupied(bitmap, dimension, y) {
            return y as i8;
        }
        y += 1;
    }
    -1
}

const fn space_bottom(bitmap: &Bitmap, dimension: usize) -> i8 {
    let mut y = dimension;
    while y > 0 {
        y -= 1;
        if row_occupied(bitmap, dimension, y) {
            return (dimension - 1 - y) as i8;
        }
    }
    -1
}

static CATALOG: [PieceDef; 7] = [
    PieceDef::new(
        PieceKind::I,
        Rgb::new(MIN_SHADE, MAX_SHADE, MAX_SHADE),
        4,
        4,
        1,
        [
            &["....", "####", "....", "...."],
            &["..#.", "..#.", "..#.", "..#."],
            &["....", "....", "####", "...."],
            &[".#..", ".#..", ".#..", ".#.."],
        ],
    ),
    PieceDef::new(
        PieceKind::J,
        Rgb::new(MIN_SHADE, MIN_SHADE, MAX_SHADE),
        3,
        3,
        2,
        [
            &["#..", "###", "..."],
            &[".##", ".#.", ".#."],
            &["...", "###", "..#"],
            &[".#.", ".#.", "##."],
        ],
    ),
    PieceDef::new(
        PieceKind::L,
        Rgb::new(MAX_SHADE, 127, MIN_SHADE),
        3,
        3,
        2,
        [
            &["..#", "###", "..."],
            &[".#.", ".#.", ".##"],
            &["...", "###", "#.."],
            &["##.", ".#.", ".#."],
        ],
    ),
    PieceDef::new(
        PieceKind::O,
        Rgb::new(MAX_SHADE, MAX_SHADE, MIN_SHADE),
        2,
        2,
        2,
        [&["##", "##"], &["##", "##"], &["##", "##"], &["##", "##"]],
    ),
    PieceDef::new(
        PieceKind::S,
        Rgb::new(MIN_SHADE, MAX_SHADE, MIN_SHADE),
        3,
        3,
        2,
        [
            &[".##", "##.", "..."],
            &[".#.", ".##", "..#"],
            &["...", ".##", "##."],
            &["#..", "##.", ".#."],
        ],
    ),
    PieceDef::new(
        PieceKind::Z,
        Rgb::new(MAX_SHADE, MIN_SHADE, MIN_SHADE),
        3,
        3,
        2,
        [
            &["##.", ".##", "..."],
            &["..#", ".##", ".#."],
            &["...", "##.", ".##"],
            &[".#.", "##.", "#.."],
        ],
    ),
    PieceDef::new(
        PieceKind::T,
        Rgb::new(128, MIN_SHADE, 128),
        3,
        3,
        2,
        [
            &[".#.", "###", "..."],
            &[".#.", ".##", ".#."],
            &["...", "###", ".#."],
            &[".#.", "##.", ".#."],
        ],
    ),
];

/// Catalog entry for a variant
pub fn piece_def(kind: PieceKind) -> &'static PieceDef {
    &CATALOG[kind.index()]
}

/// Get the shape (occupied offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    piece_def(kind).shape(rotation)
}

/// Whether bitmap cell `(x, y)` of `kind` in `rotation` is occupied
pub fn is_cell_occupied(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> bool {
    piece_def(kind).is_cell_occupied(rotation, x, y)
}

/// Empty border spacing for a piece kind and rotation
pub fn spacing(kind: PieceKind, rotation: Rotation) -> Spacing {
    piece_def(kind).spacing(rotation)
}

/// Spawn position `(column, row)` of a freshly generated piece
pub fn spawn_position(kind: PieceKind) -> (i8, i8) {
    let def = piece_def(kind);
    (def.spawn_column(), def.spawn_row())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROTATIONS: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    #[test]
    fn catalog_is_in_kind_order() {
        for kind in PieceKind::ALL {
            assert_eq!(piece_def(kind).kind(), kind);
        }
    }

    #[test]
    fn every_rotation_has_four_cells() {
        for kind in PieceKind::ALL {
            let def = piece_def(kind);
            for rotation in ROTATIONS {
                let mut count = 0;
                for y in 0..def.dimension() {
                    for x in 0..def.dimension() {
                        if def.is_cell_occupied(rotation, x, y) {
                            count += 1;
                        }
                    }
                }
                assert_eq!(count, 4, "{:?} {:?}", kind, rotation);
            }
        }
    }

    #[test]
    fn shape_matches_bitmap() {
        for kind in PieceKind::ALL {
            for rotation in ROTATIONS {
                for (x, y) in get_shape(kind, rotation) {
                    assert!(is_cell_occupied(kind, rotation, x, y));
                }
            }
        }
    }

    #[test]
    fn i_piece_spacing() {
        assert_eq!(
            spacing(PieceKind::I, Rotation::North),
            Spacing {
                left: 0,
                right: 0,
                top: 1,
                bottom: 2
            }
        );
        assert_eq!(
            spacing(PieceKind::I, Rotation::East),
            Spacing {
                left: 2,
                right: 1,
                top: 0,
                bottom: 0
            }
        );
        assert_eq!(
            spacing(PieceKind::I, Rotation::West),
            Spacing {
                left: 1,
                right: 2,
                top: 0,
                bottom: 0
            }
        );
    }

    #[test]
    fn o_piece_has_no_spacing() {
        for rotation in ROTATIONS {
            assert_eq!(
                spacing(PieceKind::O, rotation),
                Spacing {
                    left: 0,
                    right: 0,
                    top: 0,
                    bottom: 0
                }
            );
        }
    }

    #[test]
    fn spawn_positions() {
        assert_eq!(spawn_position(PieceKind::I), (3, 1));
        assert_eq!(spawn_position(PieceKind::O), (4, 0));
        for kind in [
            PieceKind::J,
            PieceKind::L,
            PieceKind::S,
            PieceKind::Z,
            PieceKind::T,
        ] {
            assert_eq!(spawn_position(kind), (4, 0), "{:?}", kind);
        }
    }

    #[test]
    fn shades_bracket_base_color() {
        let def = piece_def(PieceKind::T);
        assert_eq!(def.color(), Rgb::new(128, 35, 128));
        assert!(def.lighter().r > def.color().r);
        assert!(def.darker().r < def.color().r);
    }
}
