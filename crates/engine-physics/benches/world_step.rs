use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use engine_physics::{PhysicsWorld, RigidBody, Shape, Vec2};

const DT: f32 = 1.0 / 60.0;

/// `n` dynamic boxes on a loose grid resting over a static floor, so some pairs overlap.
fn scene(n: usize) -> PhysicsWorld {
    let mut world = PhysicsWorld::new();
    world.add_body(
        RigidBody::fixed(Shape::Box {
            width: 200.0,
            height: 1.0,
        })
        .with_position(Vec2::new(50.0, 0.0)),
    );
    let cols = (n as f32).sqrt().ceil() as usize;
    for i in 0..n {
        let x = (i % cols) as f32 * 1.5;
        let y = -((i / cols) as f32) * 1.5 - 1.0;
        let shape = if i % 3 == 0 {
            Shape::Circle { radius: 0.5 }
        } else {
            Shape::default()
        };
        world.add_body(
            RigidBody::dynamic(shape)
                .with_position(Vec2::new(x, y))
                .with_trigger(i % 7 == 0),
        );
    }
    world.on_collision(|info| {
        black_box(info.normal);
    });
    world
}

fn bench_world_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine-physics/world_step");
    for n in [16usize, 64, 256] {
        let mut world = scene(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(world.step(DT)))
        });
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let world = scene(256);
    let mut group = c.benchmark_group("engine-physics/queries");
    group.bench_function("raycast_256", |b| {
        b.iter(|| black_box(world.raycast(Vec2::new(-5.0, -3.0), Vec2::new(40.0, -3.0))))
    });
    group.bench_function("query_aabb_256", |b| {
        b.iter(|| black_box(world.query_aabb(Vec2::new(0.0, -10.0), Vec2::new(10.0, 0.0)).len()))
    });
    group.finish();
}

criterion_group!(benches, bench_world_step, bench_queries);
criterion_main!(benches);
