use core::f32::consts::SQRT_2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{CellFlags, GridPos, NavCell};

/// Multiplier applied to a cell's cost when it is entered diagonally.
pub const DIAGONAL_COST: f32 = SQRT_2;

/// Neighbor direction. Discriminants are the enumeration indices (0–7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
    NorthEast = 4,
    SouthEast = 5,
    SouthWest = 6,
    NorthWest = 7,
}

impl Direction {
    /// Fixed order for determinism: N, E, S, W, NE, SE, SW, NW.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// `(dx, dy)` with `y` growing southwards.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
            Direction::NorthWest => (-1, -1),
        }
    }

    pub const fn is_diagonal(self) -> bool {
        (self as u8) >= 4
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Read-only view of a navigable grid.
///
/// Implementors provide storage access; the walkability, cost and neighbor rules have default
/// implementations that can be overridden (e.g. terrain rules that treat `WATER` as impassable)
/// without touching the search.
pub trait NavGraph {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn cell(&self, x: i32, y: i32) -> Option<&NavCell>;
    fn allow_diagonal(&self) -> bool;
    fn cut_corners(&self) -> bool;

    fn is_valid(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width() && y < self.height()
    }

    /// Out-of-bounds cells are never walkable.
    fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_some_and(|c| !c.is_blocked())
    }

    /// Out-of-bounds cells cost `+∞`.
    fn cell_cost(&self, x: i32, y: i32) -> f32 {
        self.cell(x, y).map_or(f32::INFINITY, |c| c.cost)
    }

    /// Walkable neighbors of `(x, y)` as copies, in [`Direction::ALL`] order.
    ///
    /// Diagonals are only considered when [`NavGraph::allow_diagonal`] is set. Without
    /// [`NavGraph::cut_corners`], a diagonal additionally requires both orthogonally adjacent
    /// cells to be walkable.
    fn neighbors(&self, x: i32, y: i32) -> Vec<NavCell> {
        let mut out = Vec::with_capacity(8);
        let dirs: &[Direction] = if self.allow_diagonal() {
            &Direction::ALL
        } else {
            &Direction::CARDINAL
        };

        for dir in dirs {
            let (dx, dy) = dir.offset();
            let (nx, ny) = (x + dx, y + dy);
            if !self.is_walkable(nx, ny) {
                continue;
            }
            if dir.is_diagonal()
                && !self.cut_corners()
                && !(self.is_walkable(x + dx, y) && self.is_walkable(x, y + dy))
            {
                continue;
            }
            if let Some(cell) = self.cell(nx, ny) {
                out.push(*cell);
            }
        }
        out
    }
}

impl<T: NavGraph + ?Sized> NavGraph for &T {
    fn width(&self) -> i32 {
        (**self).width()
    }

    fn height(&self) -> i32 {
        (**self).height()
    }

    fn cell(&self, x: i32, y: i32) -> Option<&NavCell> {
        (**self).cell(x, y)
    }

    fn allow_diagonal(&self) -> bool {
        (**self).allow_diagonal()
    }

    fn cut_corners(&self) -> bool {
        (**self).cut_corners()
    }

    fn is_valid(&self, x: i32, y: i32) -> bool {
        (**self).is_valid(x, y)
    }

    fn is_walkable(&self, x: i32, y: i32) -> bool {
        (**self).is_walkable(x, y)
    }

    fn cell_cost(&self, x: i32, y: i32) -> f32 {
        (**self).cell_cost(x, y)
    }

    fn neighbors(&self, x: i32, y: i32) -> Vec<NavCell> {
        (**self).neighbors(x, y)
    }
}

/// Dense `width * height` grid of [`NavCell`]s with an optional grid-owned payload per cell.
///
/// Deserialization checks that the dimensions are positive and that `cells` holds exactly
/// one cell per coordinate, in row-major order.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct NavGrid<P = ()> {
    width: i32,
    height: i32,
    allow_diagonal: bool,
    cut_corners: bool,
    cells: Vec<NavCell>,
    #[cfg_attr(feature = "serde", serde(skip))]
    payloads: Vec<Option<P>>,
}

impl<P> NavGrid<P> {
    /// All cells walkable with cost 1.0; diagonals allowed, corner cutting forbidden.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "grid must be non-empty");
        assert!(
            width <= i32::MAX as u32 && height <= i32::MAX as u32,
            "grid dimensions must fit in i32"
        );
        let mut cells = Vec::with_capacity(cell_count(width, height));
        let width = width as i32;
        let height = height as i32;
        for y in 0..height {
            for x in 0..width {
                cells.push(NavCell::new(x, y));
            }
        }
        let payloads = core::iter::repeat_with(|| None).take(cells.len()).collect();
        Self {
            width,
            height,
            allow_diagonal: true,
            cut_corners: false,
            cells,
            payloads,
        }
    }

    pub fn with_diagonal(mut self, allow_diagonal: bool, cut_corners: bool) -> Self {
        self.allow_diagonal = allow_diagonal;
        self.cut_corners = cut_corners;
        self
    }

    pub fn set_allow_diagonal(&mut self, allow: bool) {
        self.allow_diagonal = allow;
    }

    pub fn set_cut_corners(&mut self, cut: bool) {
        self.cut_corners = cut;
    }

    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get_cell(&self, x: i32, y: i32) -> Option<NavCell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn cells(&self) -> impl Iterator<Item = &NavCell> {
        self.cells.iter()
    }

    pub fn set_cell_cost(&mut self, x: i32, y: i32, cost: f32) {
        assert!(cost >= 0.0, "cell cost must be >= 0");
        if let Some(i) = self.idx(x, y) {
            self.cells[i].cost = cost;
        }
    }

    pub fn set_cell_flags(&mut self, x: i32, y: i32, flags: CellFlags) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i].flags = flags;
        }
    }

    pub fn set_blocked(&mut self, x: i32, y: i32, blocked: bool) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i].flags.set(CellFlags::BLOCKED, blocked);
        }
    }

    /// Out-of-bounds cells report as blocked.
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        self.idx(x, y)
            .map(|i| self.cells[i].is_blocked())
            .unwrap_or(true)
    }

    /// Sets `flags` and `cost` on every in-bounds cell of the rectangle.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, flags: CellFlags, cost: f32) {
        assert!(cost >= 0.0, "cell cost must be >= 0");
        let xs = x.max(0)..x.saturating_add(w.max(0)).min(self.width);
        let ys = y.max(0)..y.saturating_add(h.max(0)).min(self.height);
        for cy in ys {
            for cx in xs.clone() {
                let Some(i) = self.idx(cx, cy) else { continue };
                self.cells[i].flags = flags;
                self.cells[i].cost = cost;
            }
        }
    }

    /// Resets every cell to cost 1.0 and no flags. Payloads are kept.
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.reset();
        }
    }

    pub fn set_payload(&mut self, x: i32, y: i32, payload: P) -> Option<P> {
        let i = self.idx(x, y)?;
        self.payloads[i].replace(payload)
    }

    pub fn payload(&self, x: i32, y: i32) -> Option<&P> {
        let i = self.idx(x, y)?;
        self.payloads.get(i)?.as_ref()
    }

    pub fn payload_mut(&mut self, x: i32, y: i32) -> Option<&mut P> {
        let i = self.idx(x, y)?;
        self.payloads.get_mut(i)?.as_mut()
    }

    pub fn take_payload(&mut self, x: i32, y: i32) -> Option<P> {
        let i = self.idx(x, y)?;
        self.payloads.get_mut(i)?.take()
    }


    pub fn contains(&self, pos: GridPos) -> bool {
        self.idx(pos.x, pos.y).is_some()
    }
}

fn cell_count(width: u32, height: u32) -> usize {
    let Some(count) = (width as usize).checked_mul(height as usize) else {
        panic!("grid of {width}x{height} cells overflows usize");
    };
    count
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawNavGrid {
    width: i32,
    height: i32,
    allow_diagonal: bool,
    cut_corners: bool,
    cells: Vec<NavCell>,
}

#[cfg(feature = "serde")]
#[derive(Debug, thiserror::Error)]
enum GridDataError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    Dimensions { width: i32, height: i32 },

    #[error("expected {expected} cells for the grid dimensions, got {actual}")]
    CellCount { expected: usize, actual: usize },

    #[error("cell {index} is at ({x}, {y}) but belongs at ({expected_x}, {expected_y})")]
    Misplaced {
        index: usize,
        x: i32,
        y: i32,
        expected_x: i32,
        expected_y: i32,
    },

    #[error("cell ({x}, {y}) has invalid cost {cost}")]
    Cost { x: i32, y: i32, cost: f32 },
}

#[cfg(feature = "serde")]
impl<P> TryFrom<RawNavGrid> for NavGrid<P> {
    type Error = GridDataError;

    fn try_from(raw: RawNavGrid) -> Result<Self, Self::Error> {
        let RawNavGrid {
            width,
            height,
            allow_diagonal,
            cut_corners,
            cells,
        } = raw;
        if width <= 0 || height <= 0 {
            return Err(GridDataError::Dimensions { width, height });
        }
        let expected = (width as usize).saturating_mul(height as usize);
        if cells.len() != expected {
            return Err(GridDataError::CellCount {
                expected,
                actual: cells.len(),
            });
        }
        for (index, cell) in cells.iter().enumerate() {
            let expected_x = (index % width as usize) as i32;
            let expected_y = (index / width as usize) as i32;
            if (cell.x, cell.y) != (expected_x, expected_y) {
                return Err(GridDataError::Misplaced {
                    index,
                    x: cell.x,
                    y: cell.y,
                    expected_x,
                    expected_y,
                });
            }
            if cell.cost.is_nan() || cell.cost < 0.0 {
                return Err(GridDataError::Cost {
                    x: cell.x,
                    y: cell.y,
                    cost: cell.cost,
                });
            }
        }
        let payloads = core::iter::repeat_with(|| None).take(cells.len()).collect();
        Ok(Self {
            width,
            height,
            allow_diagonal,
            cut_corners,
            cells,
            payloads,
        })
    }
}

#[cfg(feature = "serde")]
impl<'de, P> Deserialize<'de> for NavGrid<P> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawNavGrid::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

impl<P> NavGraph for NavGrid<P> {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn cell(&self, x: i32, y: i32) -> Option<&NavCell> {
        self.idx(x, y).map(|i| &self.cells[i])
    }

    fn allow_diagonal(&self) -> bool {
        self.allow_diagonal
    }

    fn cut_corners(&self) -> bool {
        self.cut_corners
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_indices_follow_enumeration_order() {
        for (i, d) in Direction::ALL.iter().enumerate() {
            assert_eq!(d.index(), i);
            assert_eq!(d.is_diagonal(), i >= 4);
        }
    }

    #[test]
    fn cells_are_laid_out_row_major() {
        let grid: NavGrid = NavGrid::new(4, 3);
        for y in 0..3 {
            for x in 0..4 {
                let c = grid.get_cell(x, y).expect("in bounds");
                assert_eq!((c.x, c.y), (x, y));
            }
        }
        assert_eq!(grid.cells().count(), 12);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn cell_count_does_not_overflow_i32() {
        assert_eq!(cell_count(65_536, 65_536), 1 << 32);
        assert_eq!(cell_count(i32::MAX as u32, 3), i32::MAX as usize * 3);
    }
}
