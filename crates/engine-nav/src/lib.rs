//! Grid navigation primitives: cells, grids, heuristics, A* search and path smoothing.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod cell;
pub mod grid;
pub mod heuristic;
pub mod path;
pub mod pathfinder;
pub mod smoothing;

pub use cell::{CellFlags, NavCell};
pub use grid::{Direction, NavGraph, NavGrid, DIAGONAL_COST};
pub use heuristic::Heuristic;
pub use path::{GridPath, GridPos};
pub use pathfinder::{PathError, Pathfinder, PathfinderConfig};
pub use smoothing::Smoothing;
