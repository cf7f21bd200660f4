use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cozy_room::camera::{CameraSettings, OrbitCamera};
use cozy_room::managers::{PickTarget, Picker};
use cozy_room::math::{intersect_aabb, Ray, AABB};
use cozy_room::scene::{MeshPrimitive, NodeId, SceneGraph, SceneNode};
use glam::{Vec2, Vec3};

/// Unit box centered on `center`
fn target(id: usize, center: Vec3) -> PickTarget {
    PickTarget {
        node: NodeId(id),
        name: format!("mesh-{}", id),
        bounds: AABB::new(center - Vec3::splat(0.5), center + Vec3::splat(0.5)),
    }
}

/// Targets on a ring around the origin so some rays hit and some miss
fn ring_targets(count: usize) -> Vec<PickTarget> {
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            target(i, Vec3::new(angle.cos() * 3.0, 0.0, angle.sin() * 3.0))
        })
        .collect()
}

/// Record player sized graph: a root with `parts` small meshes under it
fn vinyl_graph(parts: usize) -> (SceneGraph, NodeId) {
    let mut graph = SceneGraph::new();
    let root = graph.add(SceneNode::new("vinyl-player"), None);
    for i in 0..parts {
        let mut node = SceneNode::new(format!("part-{}", i));
        node.translation = Vec3::new(i as f32 * 0.1, 0.0, 0.0);
        node.primitives.push(MeshPrimitive {
            positions: vec![[-0.05, -0.05, -0.05], [0.05, 0.05, 0.05], [0.05, -0.05, 0.05]],
            uvs: vec![[0.0, 0.0]; 3],
            indices: vec![0, 1, 2],
        });
        graph.add(node, Some(root));
    }
    (graph, root)
}

/// Benchmark: Single AABB intersection (hit case)
fn bench_aabb_intersection_hit(c: &mut Criterion) {
    let min = Vec3::new(-1.0, -1.0, -6.0);
    let max = Vec3::new(1.0, 1.0, -4.0);
    let origin = Vec3::ZERO;
    let direction = Vec3::new(0.0, 0.0, -1.0);

    c.bench_function("aabb_intersection_hit", |b| {
        b.iter(|| {
            black_box(intersect_aabb(
                black_box(origin),
                black_box(direction),
                black_box(min),
                black_box(max),
            ))
        })
    });
}

/// Benchmark: Single AABB intersection (miss case)
fn bench_aabb_intersection_miss(c: &mut Criterion) {
    let min = Vec3::new(10.0, 10.0, -6.0);
    let max = Vec3::new(12.0, 12.0, -4.0);
    let origin = Vec3::ZERO;
    let direction = Vec3::new(0.0, 0.0, -1.0);

    c.bench_function("aabb_intersection_miss", |b| {
        b.iter(|| {
            black_box(intersect_aabb(
                black_box(origin),
                black_box(direction),
                black_box(min),
                black_box(max),
            ))
        })
    });
}

/// Benchmark: Nearest-hit pick over growing target sets
fn bench_pick_targets(c: &mut Criterion) {
    let mut group = c.benchmark_group("pick_targets");
    let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.3, 0.0, -1.0));

    for count in [3, 16, 64, 256] {
        let picker = Picker::new(ring_targets(count));
        group.bench_with_input(BenchmarkId::from_parameter(count), &picker, |b, picker| {
            b.iter(|| black_box(picker.pick(black_box(&ray))))
        });
    }

    group.finish();
}

/// Benchmark: Camera ray cast plus pick, the per-frame hover cost
fn bench_hover_frame(c: &mut Criterion) {
    let camera = OrbitCamera::new(&CameraSettings::default(), 16.0 / 9.0);
    let picker = Picker::new(ring_targets(3));

    c.bench_function("hover_frame", |b| {
        b.iter(|| {
            let ray = camera.pick_ray(black_box(Vec2::new(0.1, -0.2)));
            black_box(picker.pick(&ray))
        })
    });
}

/// Benchmark: Moving target bounds after the disc and arm moved
fn bench_refresh_targets(c: &mut Criterion) {
    let mut group = c.benchmark_group("refresh_targets");

    for parts in [2, 8, 32] {
        let (graph, root) = vinyl_graph(parts);
        let world = graph.world_matrices();
        let mut picker = Picker::from_graph(&graph, &[root], &world);
        group.bench_with_input(BenchmarkId::from_parameter(parts), &parts, |b, _| {
            b.iter(|| {
                picker.refresh(&graph, &world);
                black_box(picker.targets().len())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_aabb_intersection_hit,
    bench_aabb_intersection_miss,
    bench_pick_targets,
    bench_hover_frame,
    bench_refresh_targets,
);

criterion_main!(benches);
