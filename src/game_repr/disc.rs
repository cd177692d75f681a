use std::fmt;

/// Side to move. Black is player A: it moves first and owns the set bits of
/// the position's colour bitboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    #[inline(always)]
    pub fn opposite(&self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// +1 for Black, -1 for White
    #[inline(always)]
    pub fn sign(&self) -> f32 {
        match self {
            Color::Black => 1.0,
            Color::White => -1.0,
        }
    }

    /// Index used by per-colour tables (matches the colour bit)
    #[inline(always)]
    pub fn index(&self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// One cell of a board snapshot exchanged with callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tile {
    #[default]
    Empty,
    Black,
    White,
}

impl Tile {
    pub fn color(&self) -> Option<Color> {
        match self {
            Tile::Empty => None,
            Tile::Black => Some(Color::Black),
            Tile::White => Some(Color::White),
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::Black => 'X',
            Tile::White => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Tile> {
        match c {
            '.' | '-' => Some(Tile::Empty),
            'X' | 'x' | 'B' | 'b' => Some(Tile::Black),
            'O' | 'o' | 'W' | 'w' => Some(Tile::White),
            _ => None,
        }
    }
}

impl From<Color> for Tile {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Tile::Black,
            Color::White => Tile::White,
        }
    }
}

/// Immutable board handed over by the caller, indexed `[x][y]`
pub type BoardSnapshot = [[Tile; 8]; 8];
