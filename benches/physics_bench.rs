use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use gridstep::*;
use std::hint::black_box;

const DT: f32 = 1.0 / 60.0;

fn scattered_bodies(body_count: usize) -> Vec<RigidBody> {
    (0..body_count)
        .map(|i| {
            let f = i as f32;
            RigidBody::default()
                .with_position(Vec3::new(
                    (f * 0.618).fract() * 40.0,
                    (f * 0.414).fract() * 40.0,
                    (f * 0.732).fract() * 40.0,
                ))
                .with_angular_velocity(Vec3::new(0.0, 1.0, 0.0))
        })
        .collect()
}

fn prepare_scene(body_count: usize) -> Scene {
    Scene::new(SceneConfig::default(), scattered_bodies(body_count))
        .expect("default configuration is valid")
}

fn bench_scene_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_step");
    for &count in &[128usize, 512, 2048] {
        group.bench_with_input(BenchmarkId::new("step", count), &count, |b, &count| {
            let mut scene = prepare_scene(count);
            b.iter(|| black_box(scene.step(black_box(DT))))
        });
    }
    group.finish();
}

fn bench_grid_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_rebuild");
    for &buckets in &[64usize, 1024, 16384] {
        group.bench_with_input(
            BenchmarkId::new("buckets", buckets),
            &buckets,
            |b, &buckets| {
                let bodies = Arena::from(scattered_bodies(2048));
                let mut grid = SpatialHashGrid::new(1.0, buckets);
                b.iter(|| {
                    grid.rebuild(black_box(&bodies));
                    black_box(grid.occupied_cells())
                })
            },
        );
    }
    group.finish();
}

fn bench_joint_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("joint_chain");
    let links = 256;
    let bodies: Vec<RigidBody> = (0..links)
        .map(|i| RigidBody::new(Vec3::new(i as f32 * 1.1, 0.0, 0.0), 1.0))
        .collect();
    let joints: Vec<DistanceJoint> = (1..links)
        .map(|i| DistanceJoint::new(BodyHandle::from_index(i - 1), BodyHandle::from_index(i), 1.0))
        .collect();

    group.bench_function("solve", |b| {
        let mut scene = Scene::new(SceneConfig::zero_gravity(), bodies.clone())
            .expect("default configuration is valid");
        b.iter(|| {
            scene
                .solve_joints(black_box(&joints))
                .expect("chain joints are valid")
        })
    });
    group.finish();
}

criterion_group!(benches, bench_scene_step, bench_grid_rebuild, bench_joint_chain);
criterion_main!(benches);
