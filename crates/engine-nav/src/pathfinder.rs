use core::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{GridPath, GridPos, Heuristic, NavGraph, NavGrid, Smoothing, DIAGONAL_COST};

/// Why a search produced no path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("no grid attached to the pathfinder")]
    NoGrid,

    #[error("start ({x}, {y}) is out of bounds or not walkable")]
    InvalidStart { x: i32, y: i32 },

    #[error("goal ({x}, {y}) is out of bounds or not walkable")]
    InvalidGoal { x: i32, y: i32 },

    #[error("no path between start and goal")]
    NoPath,
}

impl PathError {
    /// `NoPath` is an ordinary outcome; the other variants are caller errors.
    pub fn is_no_path(&self) -> bool {
        matches!(self, PathError::NoPath)
    }
}

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathfinderConfig {
    pub heuristic: Heuristic,
    pub smoothing: Smoothing,
    /// Hard cap on expanded nodes per search; `0` means unlimited.
    pub max_iterations: u32,
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        Self {
            heuristic: Heuristic::Manhattan,
            smoothing: Smoothing::None,
            max_iterations: 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Node {
    g: f32,
    parent: Option<GridPos>,
    closed: bool,
}

#[derive(Debug)]
struct OpenNode {
    f: f32,
    g: f32,
    pos: GridPos,
    tie: u64,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap; equal f pops in
        // insertion order.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.tie.cmp(&self.tie))
    }
}

/// A* search over an attached [`NavGraph`].
///
/// Every [`Pathfinder::find_path`] call is self-contained; the only state kept between calls is
/// the explored-node counter of the last search.
#[derive(Debug, Clone)]
pub struct Pathfinder<G = NavGrid> {
    grid: Option<G>,
    config: PathfinderConfig,
    last_nodes_explored: usize,
}

impl<G: NavGraph> Default for Pathfinder<G> {
    fn default() -> Self {
        Self::new(PathfinderConfig::default())
    }
}

impl<G: NavGraph> Pathfinder<G> {
    pub fn new(config: PathfinderConfig) -> Self {
        Self {
            grid: None,
            config,
            last_nodes_explored: 0,
        }
    }

    pub fn with_grid(grid: G, config: PathfinderConfig) -> Self {
        Self {
            grid: Some(grid),
            config,
            last_nodes_explored: 0,
        }
    }

    pub fn config(&self) -> PathfinderConfig {
        self.config
    }

    pub fn set_config(&mut self, config: PathfinderConfig) {
        self.config = config;
    }

    pub fn set_heuristic(&mut self, heuristic: Heuristic) {
        self.config.heuristic = heuristic;
    }

    pub fn set_smoothing(&mut self, smoothing: Smoothing) {
        self.config.smoothing = smoothing;
    }

    pub fn set_max_iterations(&mut self, max_iterations: u32) {
        self.config.max_iterations = max_iterations;
    }

    pub fn grid(&self) -> Option<&G> {
        self.grid.as_ref()
    }

    pub fn grid_mut(&mut self) -> Option<&mut G> {
        self.grid.as_mut()
    }

    pub fn set_grid(&mut self, grid: G) -> Option<G> {
        self.grid.replace(grid)
    }

    pub fn take_grid(&mut self) -> Option<G> {
        self.grid.take()
    }

    /// Nodes closed by the most recent search (0 after a configuration error or a
    /// start == goal short-circuit).
    pub fn last_nodes_explored(&self) -> usize {
        self.last_nodes_explored
    }

    pub fn is_reachable(&mut self, start: GridPos, goal: GridPos) -> bool {
        self.find_path(start, goal).is_ok()
    }

    pub fn find_path(&mut self, start: GridPos, goal: GridPos) -> Result<GridPath, PathError> {
        self.last_nodes_explored = 0;
        let grid = self.grid.as_ref().ok_or(PathError::NoGrid)?;

        if !grid.is_valid(start.x, start.y) || !grid.is_walkable(start.x, start.y) {
            return Err(PathError::InvalidStart {
                x: start.x,
                y: start.y,
            });
        }
        if !grid.is_valid(goal.x, goal.y) || !grid.is_walkable(goal.x, goal.y) {
            return Err(PathError::InvalidGoal {
                x: goal.x,
                y: goal.y,
            });
        }

        if start == goal {
            return Ok(GridPath::new(vec![start], 0.0));
        }

        let (result, explored) = a_star(grid, start, goal, &self.config);
        self.last_nodes_explored = explored;

        match result {
            Some(path) => {
                tracing::debug!(
                    ?start,
                    ?goal,
                    explored,
                    cost = path.total_cost,
                    waypoints = path.points.len(),
                    "path found"
                );
                let points = self.config.smoothing.apply(grid, path.points);
                Ok(GridPath::new(points, path.total_cost))
            }
            None => {
                tracing::debug!(?start, ?goal, explored, "no path");
                Err(PathError::NoPath)
            }
        }
    }
}

fn a_star<G: NavGraph + ?Sized>(
    grid: &G,
    start: GridPos,
    goal: GridPos,
    config: &PathfinderConfig,
) -> (Option<GridPath>, usize) {
    let mut open = BinaryHeap::<OpenNode>::new();
    let mut nodes: HashMap<GridPos, Node> = HashMap::new();
    let mut tie: u64 = 0;
    let mut iterations: u32 = 0;
    let mut explored = 0usize;

    nodes.insert(
        start,
        Node {
            g: 0.0,
            parent: None,
            closed: false,
        },
    );
    open.push(OpenNode {
        f: config.heuristic.estimate(start, goal),
        g: 0.0,
        pos: start,
        tie,
    });
    tie += 1;

    while let Some(entry) = open.pop() {
        let Some(node) = nodes.get_mut(&entry.pos) else {
            continue;
        };
        if node.closed || entry.g != node.g {
            // Stale heap entry.
            continue;
        }

        if config.max_iterations > 0 && iterations >= config.max_iterations {
            break;
        }
        iterations += 1;

        node.closed = true;
        explored += 1;
        let current_g = node.g;

        if entry.pos == goal {
            return (Some(reconstruct(&nodes, goal)), explored);
        }

        for n in grid.neighbors(entry.pos.x, entry.pos.y) {
            let npos = GridPos::new(n.x, n.y);
            let mut move_cost = grid.cell_cost(n.x, n.y);
            if n.x != entry.pos.x && n.y != entry.pos.y {
                move_cost *= DIAGONAL_COST;
            }
            if !move_cost.is_finite() {
                continue;
            }
            let tentative_g = current_g + move_cost;

            match nodes.get_mut(&npos) {
                Some(existing) => {
                    if existing.closed || tentative_g >= existing.g {
                        continue;
                    }
                    existing.g = tentative_g;
                    existing.parent = Some(entry.pos);
                }
                None => {
                    nodes.insert(
                        npos,
                        Node {
                            g: tentative_g,
                            parent: Some(entry.pos),
                            closed: false,
                        },
                    );
                }
            }

            open.push(OpenNode {
                f: tentative_g + config.heuristic.estimate(npos, goal),
                g: tentative_g,
                pos: npos,
                tie,
            });
            tie += 1;
        }
    }

    (None, explored)
}

fn reconstruct(nodes: &HashMap<GridPos, Node>, goal: GridPos) -> GridPath {
    let total_cost = nodes.get(&goal).map_or(0.0, |n| n.g);
    let mut points = vec![goal];
    let mut current = goal;
    while let Some(prev) = nodes.get(&current).and_then(|n| n.parent) {
        points.push(prev);
        current = prev;
    }
    points.reverse();
    GridPath::new(points, total_cost)
}
