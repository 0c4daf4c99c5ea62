use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bitmask describing per-cell navigation rules.
///
/// Only [`CellFlags::BLOCKED`] is interpreted by the default walkability rules. The remaining
/// bits are free for game-specific rules implemented through [`crate::NavGraph`] overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CellFlags(u32);

impl CellFlags {
    pub const NONE: Self = Self(0);
    pub const BLOCKED: Self = Self(1 << 0);
    pub const WATER: Self = Self(1 << 1);
    pub const HAZARD: Self = Self(1 << 2);
    pub const USER_0: Self = Self(1 << 8);
    pub const USER_1: Self = Self(1 << 9);
    pub const USER_2: Self = Self(1 << 10);
    pub const USER_3: Self = Self(1 << 11);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    pub fn set(&mut self, other: Self, on: bool) {
        if on {
            self.insert(other);
        } else {
            self.remove(other);
        }
    }
}

impl BitOr for CellFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CellFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CellFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for CellFlags {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for CellFlags {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

/// One grid tile.
///
/// Identity is `(x, y)` within the owning grid. Values handed out by neighbor queries are
/// copies; user payloads stay in the grid and are never part of a `NavCell`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavCell {
    pub x: i32,
    pub y: i32,
    /// Movement cost for entering this cell (>= 0).
    pub cost: f32,
    pub flags: CellFlags,
}

impl NavCell {
    pub const DEFAULT_COST: f32 = 1.0;

    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            cost: Self::DEFAULT_COST,
            flags: CellFlags::NONE,
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.flags.contains(CellFlags::BLOCKED)
    }

    pub(crate) fn reset(&mut self) {
        self.cost = Self::DEFAULT_COST;
        self.flags = CellFlags::NONE;
    }
}
