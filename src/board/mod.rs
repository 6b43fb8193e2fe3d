//! Board representation for 4x4x4 score-four

pub mod board;
pub mod lines;

#[cfg(test)]
mod tests;

// Re-exports
pub use board::Board;
pub use lines::{lines, Line};

/// Board edge length (4x4x4 cube)
pub const BOARD_SIZE: usize = 4;
/// Number of drop columns (one per (x, y) pair)
pub const NUM_COLUMNS: usize = BOARD_SIZE * BOARD_SIZE; // 16
pub const TOTAL_CELLS: usize = NUM_COLUMNS * BOARD_SIZE; // 64
/// Number of distinct winning lines on the cube
pub const NUM_LINES: usize = 76;

/// The two players. Host cell values 1 and 2 map onto `One` and `Two`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Get opponent
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Host-facing cell value (1 or 2)
    #[inline]
    pub fn to_cell(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Parse a host cell value. Returns `None` for 0 (empty) and for
    /// anything outside the 0-2 domain.
    #[inline]
    pub fn from_cell(value: u8) -> Option<Player> {
        match value {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    /// 0-based index, used for per-player tables
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

/// Outcome of a finished game. `None` from [`Board::result`] means the game
/// is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Won(Player),
    Draw,
}

/// A drop column: an (x, y) pair. Pieces dropped here land at the lowest
/// empty z of that column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Column {
    pub x: u8,
    pub y: u8,
}

impl Column {
    /// The four central columns, in opening-book priority order.
    pub const CENTRAL: [Column; 4] = [
        Column::new(1, 1),
        Column::new(2, 2),
        Column::new(2, 1),
        Column::new(1, 2),
    ];

    #[inline]
    pub const fn new(x: u8, y: u8) -> Self {
        debug_assert!(x < BOARD_SIZE as u8 && y < BOARD_SIZE as u8);
        Self { x, y }
    }

    /// Bounds-checked constructor for untrusted coordinates.
    #[inline]
    pub fn try_new(x: i32, y: i32) -> Option<Self> {
        if (0..BOARD_SIZE as i32).contains(&x) && (0..BOARD_SIZE as i32).contains(&y) {
            Some(Self::new(x as u8, y as u8))
        } else {
            None
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.y as usize * BOARD_SIZE + self.x as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        debug_assert!(idx < NUM_COLUMNS);
        Self::new((idx % BOARD_SIZE) as u8, (idx / BOARD_SIZE) as u8)
    }

    /// Doubled Manhattan distance from the cube's central axis.
    /// 2 for the four central columns, up to 6 in the corners.
    #[inline]
    pub fn centrality(self) -> i32 {
        (2 * i32::from(self.x) - 3).abs() + (2 * i32::from(self.y) - 3).abs()
    }

    /// True for the four columns around the central axis.
    #[inline]
    pub fn is_central(self) -> bool {
        self.centrality() == 2
    }

    /// All 16 columns in row-major order.
    pub fn all() -> impl Iterator<Item = Column> {
        (0..NUM_COLUMNS).map(Column::from_index)
    }
}

/// A single cell of the cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl Coord {
    #[inline]
    pub const fn new(x: u8, y: u8, z: u8) -> Self {
        debug_assert!(x < BOARD_SIZE as u8 && y < BOARD_SIZE as u8 && z < BOARD_SIZE as u8);
        Self { x, y, z }
    }

    #[inline]
    pub fn column(self) -> Column {
        Column::new(self.x, self.y)
    }

    /// Bit index into a 64-cell bitboard
    #[inline]
    pub fn bit_index(self) -> usize {
        self.x as usize + self.y as usize * BOARD_SIZE + self.z as usize * NUM_COLUMNS
    }

    /// Single-bit mask for this cell
    #[inline]
    pub fn bit(self) -> u64 {
        1u64 << self.bit_index()
    }

    #[inline]
    pub fn from_bit_index(idx: usize) -> Self {
        debug_assert!(idx < TOTAL_CELLS);
        Self::new(
            (idx % BOARD_SIZE) as u8,
            ((idx / BOARD_SIZE) % BOARD_SIZE) as u8,
            (idx / NUM_COLUMNS) as u8,
        )
    }
}
