//! Drops a ball onto a floor with a trigger zone while an agent plans a route around a wall.
//!
//! Run with `RUST_LOG=debug cargo run -p engine --example demo` to see library logs.

use std::cell::RefCell;
use std::rc::Rc;

use engine::nav::{CellFlags, GridPos, Heuristic, NavGrid, Pathfinder, PathfinderConfig, Smoothing};
use engine::physics::{PhysicsWorld, RigidBody, Shape, TriggerPhase, Vec2};
use engine::{ConfigError, EngineConfig};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<(), ConfigError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();

    let config = EngineConfig::load_or_default("engine.yaml")?;

    // --- Pathfinding ---------------------------------------------------------
    let mut grid: NavGrid = NavGrid::new(12, 8);
    grid.fill_rect(5, 0, 1, 6, CellFlags::BLOCKED, 1.0);
    grid.fill_rect(8, 4, 2, 3, CellFlags::WATER, 3.0);

    let mut pathfinder = Pathfinder::with_grid(
        grid,
        PathfinderConfig {
            heuristic: Heuristic::Octile,
            smoothing: Smoothing::LineOfSight,
            ..config.pathfinding
        },
    );
    match pathfinder.find_path(GridPos::new(1, 1), GridPos::new(10, 1)) {
        Ok(path) => {
            let waypoints: Vec<_> = path.iter().map(|p| (p.x, p.y)).collect();
            tracing::info!(cost = path.total_cost, ?waypoints, "route planned");
        }
        Err(e) if e.is_no_path() => tracing::info!("no route"),
        Err(e) => tracing::error!(error = %e, "bad path request"),
    }

    // --- Physics -------------------------------------------------------------
    let mut world = PhysicsWorld::try_new(config.physics)?;
    world.add_body(
        RigidBody::fixed(Shape::Box {
            width: 20.0,
            height: 1.0,
        })
        .with_position(Vec2::new(0.0, 10.0)),
    );
    world.add_body(
        RigidBody::fixed(Shape::Box {
            width: 2.0,
            height: 2.0,
        })
        .with_position(Vec2::new(0.0, 5.0))
        .with_trigger(true),
    );
    let ball = world.add_body(RigidBody::dynamic(Shape::Circle { radius: 0.5 }));

    let landed = Rc::new(RefCell::new(false));
    let flag = landed.clone();
    world.on_collision(move |info| {
        if !*flag.borrow() {
            tracing::info!(point = ?info.contact_point, "ball hit the floor");
        }
        *flag.borrow_mut() = true;
    });
    world.on_trigger(|event| match event.phase {
        TriggerPhase::Enter => tracing::info!("ball entered the zone"),
        TriggerPhase::Exit => tracing::info!("ball left the zone"),
    });

    let frame = 1.0 / 30.0;
    for _ in 0..90 {
        world.step(frame);
        if *landed.borrow() {
            break;
        }
    }
    if let Some(body) = world.body(ball) {
        tracing::info!(
            position = ?body.position(),
            substeps = world.total_substeps(),
            "simulation finished"
        );
    }
    Ok(())
}
