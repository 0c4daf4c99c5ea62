use engine_nav::{
    GridPos, Heuristic, NavGrid, PathError, Pathfinder, PathfinderConfig, Smoothing,
    DIAGONAL_COST,
};

fn p(x: i32, y: i32) -> GridPos {
    GridPos::new(x, y)
}

fn pathfinder(grid: NavGrid, heuristic: Heuristic) -> Pathfinder {
    Pathfinder::with_grid(
        grid,
        PathfinderConfig {
            heuristic,
            ..PathfinderConfig::default()
        },
    )
}

fn assert_contiguous(points: &[GridPos]) {
    for w in points.windows(2) {
        let dx = (w[1].x - w[0].x).abs();
        let dy = (w[1].y - w[0].y).abs();
        assert!(dx <= 1 && dy <= 1 && dx + dy > 0, "gap between {:?}", w);
    }
}

#[test]
fn no_grid_is_a_configuration_error() {
    let mut pf: Pathfinder = Pathfinder::new(PathfinderConfig::default());
    assert_eq!(pf.find_path(p(0, 0), p(1, 1)), Err(PathError::NoGrid));
    assert!(!pf.is_reachable(p(0, 0), p(1, 1)));
}

#[test]
fn out_of_bounds_endpoints_are_rejected() {
    let mut pf = pathfinder(NavGrid::new(4, 4), Heuristic::Manhattan);
    assert_eq!(
        pf.find_path(p(-1, 0), p(2, 2)),
        Err(PathError::InvalidStart { x: -1, y: 0 })
    );
    assert_eq!(
        pf.find_path(p(0, 0), p(4, 2)),
        Err(PathError::InvalidGoal { x: 4, y: 2 })
    );
}

#[test]
fn blocked_start_and_goal_are_rejected() {
    let mut grid: NavGrid = NavGrid::new(5, 5);
    grid.set_blocked(0, 0, true);
    grid.set_blocked(4, 4, true);
    let mut pf = pathfinder(grid, Heuristic::Manhattan);

    let err = pf.find_path(p(0, 0), p(2, 2)).unwrap_err();
    assert_eq!(err, PathError::InvalidStart { x: 0, y: 0 });
    assert!(!err.is_no_path());

    assert_eq!(
        pf.find_path(p(2, 2), p(4, 4)),
        Err(PathError::InvalidGoal { x: 4, y: 4 })
    );
}

#[test]
fn start_equal_goal_short_circuits() {
    let mut pf = pathfinder(NavGrid::new(8, 8), Heuristic::Manhattan);
    let path = pf.find_path(p(3, 3), p(3, 3)).expect("trivial path");
    assert_eq!(path.points, vec![p(3, 3)]);
    assert_eq!(path.total_cost, 0.0);
    assert_eq!(pf.last_nodes_explored(), 0);
}

#[test]
fn straight_line_on_open_cardinal_grid() {
    let grid: NavGrid = NavGrid::new(6, 1).with_diagonal(false, false);
    let mut pf = pathfinder(grid, Heuristic::Manhattan);
    let path = pf.find_path(p(0, 0), p(5, 0)).expect("path");
    assert_eq!(path.points, (0..6).map(|x| p(x, 0)).collect::<Vec<_>>());
    assert!((path.total_cost - 5.0).abs() < 1e-5);
    assert_eq!(pf.last_nodes_explored(), 6);
}

#[test]
fn diagonal_move_costs_cell_cost_times_sqrt2() {
    let mut grid: NavGrid = NavGrid::new(2, 2);
    grid.set_cell_cost(1, 1, 3.0);
    let mut pf = pathfinder(grid, Heuristic::Octile);

    let path = pf.find_path(p(0, 0), p(1, 1)).expect("path");
    assert_eq!(path.points, vec![p(0, 0), p(1, 1)]);
    assert!((path.total_cost - 3.0 * DIAGONAL_COST).abs() < 1e-5);
    assert!((DIAGONAL_COST - 1.414_213_56).abs() < 1e-6);
}

#[test]
fn cell_costs_steer_the_search() {
    // Going straight through the expensive middle row costs more than walking around it.
    let mut grid: NavGrid = NavGrid::new(3, 3).with_diagonal(false, false);
    grid.set_cell_cost(1, 1, 10.0);
    let mut pf = pathfinder(grid, Heuristic::Manhattan);

    let path = pf.find_path(p(0, 1), p(2, 1)).expect("path");
    assert!(!path.points.contains(&p(1, 1)));
    assert!((path.total_cost - 4.0).abs() < 1e-5);
    assert_contiguous(&path.points);
}

#[test]
fn finds_path_around_wall_and_reports_no_path_when_sealed() {
    let mut grid: NavGrid = NavGrid::new(5, 5);
    for y in 0..5 {
        if y != 2 {
            grid.set_blocked(2, y, true);
        }
    }
    let mut pf = pathfinder(grid, Heuristic::Octile);

    let path = pf.find_path(p(0, 0), p(4, 4)).expect("path through gap");
    assert!(path.points.contains(&p(2, 2)));
    assert_eq!(path.start(), Some(p(0, 0)));
    assert_eq!(path.goal(), Some(p(4, 4)));
    assert_contiguous(&path.points);

    if let Some(grid) = pf.grid_mut() {
        grid.set_blocked(2, 2, true);
    }
    let err = pf.find_path(p(0, 0), p(4, 4)).unwrap_err();
    assert!(err.is_no_path());
    assert!(pf.last_nodes_explored() > 0);
    assert!(!pf.is_reachable(p(0, 0), p(4, 4)));
}

#[test]
fn max_iterations_caps_the_search() {
    let grid: NavGrid = NavGrid::new(20, 20);
    let mut pf = Pathfinder::with_grid(
        grid,
        PathfinderConfig {
            heuristic: Heuristic::Octile,
            max_iterations: 3,
            ..PathfinderConfig::default()
        },
    );

    assert_eq!(pf.find_path(p(0, 0), p(19, 19)), Err(PathError::NoPath));
    assert_eq!(pf.last_nodes_explored(), 3);

    pf.set_max_iterations(0);
    assert!(pf.find_path(p(0, 0), p(19, 19)).is_ok());
}

#[test]
fn identical_requests_give_identical_paths() {
    let mut grid: NavGrid = NavGrid::new(10, 10);
    for y in 0..10 {
        grid.set_blocked(5, y, true);
    }
    grid.set_blocked(5, 5, false);
    let mut pf = pathfinder(grid, Heuristic::Manhattan);

    let a = pf.find_path(p(1, 1), p(8, 8)).expect("path");
    let explored_a = pf.last_nodes_explored();
    let b = pf.find_path(p(1, 1), p(8, 8)).expect("path");
    assert_eq!(a, b);
    assert_eq!(explored_a, pf.last_nodes_explored());
}

#[test]
fn informed_heuristics_explore_fewer_nodes() {
    fn dijkstra(_: i32, _: i32, _: i32, _: i32) -> f32 {
        0.0
    }
    let grid: NavGrid = NavGrid::new(16, 16);

    let mut blind = pathfinder(grid.clone(), Heuristic::Custom(dijkstra));
    let mut octile = pathfinder(grid, Heuristic::Octile);

    let a = blind.find_path(p(0, 0), p(15, 10)).expect("path");
    let b = octile.find_path(p(0, 0), p(15, 10)).expect("path");
    assert!((a.total_cost - b.total_cost).abs() < 1e-4);
    assert!(octile.last_nodes_explored() < blind.last_nodes_explored());
}

#[test]
fn simple_smoothing_keeps_only_turns() {
    let grid: NavGrid = NavGrid::new(5, 5).with_diagonal(false, false);
    let mut pf = pathfinder(grid, Heuristic::Manhattan);
    pf.set_smoothing(Smoothing::Simple);

    let path = pf.find_path(p(0, 0), p(4, 0)).expect("path");
    assert_eq!(path.points, vec![p(0, 0), p(4, 0)]);
    assert!((path.total_cost - 4.0).abs() < 1e-5);

    let mut grid: NavGrid = NavGrid::new(5, 5).with_diagonal(false, false);
    // Force an L: the only way to (4,4) from (0,0) runs down column 0 then along row 4.
    grid.fill_rect(1, 0, 4, 4, engine_nav::CellFlags::BLOCKED, 1.0);
    pf.set_grid(grid);
    let path = pf.find_path(p(0, 0), p(4, 4)).expect("path");
    assert_eq!(path.points, vec![p(0, 0), p(0, 4), p(4, 4)]);
    assert!((path.total_cost - 8.0).abs() < 1e-5);
}

#[test]
fn line_of_sight_smoothing_shortcuts_open_space() {
    let grid: NavGrid = NavGrid::new(8, 8).with_diagonal(false, false);
    let mut pf = pathfinder(grid, Heuristic::Manhattan);
    pf.set_smoothing(Smoothing::LineOfSight);

    let path = pf.find_path(p(0, 0), p(6, 3)).expect("path");
    assert_eq!(path.points.first(), Some(&p(0, 0)));
    assert_eq!(path.points.last(), Some(&p(6, 3)));
    assert_eq!(path.points.len(), 2);
    assert!((path.total_cost - 9.0).abs() < 1e-5);
}

#[test]
fn line_of_sight_smoothing_keeps_corners_around_walls() {
    let mut grid: NavGrid = NavGrid::new(5, 5).with_diagonal(false, false);
    grid.fill_rect(1, 0, 4, 4, engine_nav::CellFlags::BLOCKED, 1.0);
    let mut pf = pathfinder(grid, Heuristic::Manhattan);
    pf.set_smoothing(Smoothing::LineOfSight);

    let path = pf.find_path(p(0, 0), p(4, 4)).expect("path");
    assert_eq!(path.points, vec![p(0, 0), p(0, 4), p(4, 4)]);
}

#[test]
fn borrowed_grid_can_be_searched() {
    let grid: NavGrid = NavGrid::new(4, 4);
    let mut pf = Pathfinder::with_grid(&grid, PathfinderConfig::default());
    assert!(pf.is_reachable(p(0, 0), p(3, 3)));
    assert!(pf.take_grid().is_some());
    assert_eq!(pf.find_path(p(0, 0), p(3, 3)), Err(PathError::NoGrid));
}
