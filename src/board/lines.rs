//! The fixed catalog of winning lines
//!
//! A 4x4x4 cube has exactly 76 four-in-a-row lines: 48 axis-aligned
//! (16 per axis), 24 planar diagonals (2 per layer, 4 layers, 3 plane
//! orientations) and 4 space diagonals. The catalog is enumerated once
//! and cached for the process lifetime; every component (win detection,
//! evaluation, threat scans) iterates over it.

use once_cell::sync::Lazy;

use super::{Coord, BOARD_SIZE, NUM_LINES};

/// One winning line: four cells along a fixed direction, plus the
/// precomputed bitboard mask covering them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub cells: [Coord; 4],
    pub mask: u64,
}

impl Line {
    fn new(cells: [Coord; 4]) -> Self {
        let mask = cells.iter().fold(0u64, |m, c| m | c.bit());
        Self { cells, mask }
    }
}

static LINES: Lazy<Vec<Line>> = Lazy::new(build_lines);

/// All 76 winning lines.
#[inline]
pub fn lines() -> &'static [Line] {
    &LINES
}

fn line_from(origin: (i32, i32, i32), dir: (i32, i32, i32)) -> Line {
    let mut cells = [Coord::new(0, 0, 0); 4];
    for (i, cell) in cells.iter_mut().enumerate() {
        let step = i as i32;
        *cell = Coord::new(
            (origin.0 + dir.0 * step) as u8,
            (origin.1 + dir.1 * step) as u8,
            (origin.2 + dir.2 * step) as u8,
        );
    }
    Line::new(cells)
}

fn build_lines() -> Vec<Line> {
    let n = BOARD_SIZE as i32;
    let mut out = Vec::with_capacity(NUM_LINES);

    // Axis-aligned: 16 along each of x, y, z
    for a in 0..n {
        for b in 0..n {
            out.push(line_from((0, a, b), (1, 0, 0)));
            out.push(line_from((a, 0, b), (0, 1, 0)));
            out.push(line_from((a, b, 0), (0, 0, 1)));
        }
    }

    // Planar diagonals: 2 per layer in each of the 3 plane orientations
    for layer in 0..n {
        // xy planes (fixed z)
        out.push(line_from((0, 0, layer), (1, 1, 0)));
        out.push(line_from((0, 3, layer), (1, -1, 0)));
        // xz planes (fixed y)
        out.push(line_from((0, layer, 0), (1, 0, 1)));
        out.push(line_from((0, layer, 3), (1, 0, -1)));
        // yz planes (fixed x)
        out.push(line_from((layer, 0, 0), (0, 1, 1)));
        out.push(line_from((layer, 0, 3), (0, 1, -1)));
    }

    // Space diagonals
    out.push(line_from((0, 0, 0), (1, 1, 1)));
    out.push(line_from((3, 0, 0), (-1, 1, 1)));
    out.push(line_from((0, 3, 0), (1, -1, 1)));
    out.push(line_from((0, 0, 3), (1, 1, -1)));

    debug_assert_eq!(out.len(), NUM_LINES);
    out
}
