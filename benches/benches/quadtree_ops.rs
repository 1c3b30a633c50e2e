// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Circle, Point, Rect};
use understory_quadtree::{Body, QuadTree, QuadTreeConfig};

const WORLD: f64 = 2048.0;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_uniform_bodies(count: u64, radius: f64) -> Vec<Body> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|id| {
            let x = radius + rng.next_f64() * (WORLD - 2.0 * radius);
            let y = radius + rng.next_f64() * (WORLD - 2.0 * radius);
            Body::new(id, Point::new(x, y), radius)
        })
        .collect()
}

fn gen_clustered_bodies(n_clusters: usize, per_cluster: u64, spread: f64) -> Vec<Body> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let centers: Vec<_> = (0..n_clusters)
        .map(|_| {
            Point::new(
                spread + rng.next_f64() * (WORLD - 2.0 * spread),
                spread + rng.next_f64() * (WORLD - 2.0 * spread),
            )
        })
        .collect();
    let mut out = Vec::new();
    let mut id = 0;
    for c in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Body::new(id, c + (dx, dy), 4.0));
            id += 1;
        }
    }
    out
}

fn config() -> QuadTreeConfig {
    QuadTreeConfig::default()
        .with_boundary(Rect::new(0.0, 0.0, WORLD, WORLD))
        .with_capacity(8)
        .with_max_depth(8)
}

fn build(bodies: &[Body]) -> QuadTree<Body> {
    let mut tree = QuadTree::from_config(&config()).unwrap();
    for b in bodies {
        tree.insert(*b);
    }
    tree
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_build");
    for &n in &[1_000u64, 10_000] {
        let uniform = gen_uniform_bodies(n, 4.0);
        let clustered = gen_clustered_bodies(16, n / 16, 120.0);
        group.throughput(Throughput::Elements(n));

        group.bench_function(format!("uniform_n{}", n), |b| {
            b.iter(|| black_box(build(&uniform)))
        });
        group.bench_function(format!("clustered_n{}", n), |b| {
            b.iter(|| black_box(build(&clustered)))
        });
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_query");
    for &n in &[1_000u64, 10_000] {
        let bodies = gen_uniform_bodies(n, 4.0);
        let tree = build(&bodies);
        group.throughput(Throughput::Elements(n));

        group.bench_function(format!("query_near_each_n{}", n), |b| {
            let mut out = Vec::new();
            b.iter(|| {
                let mut total = 0;
                for body in &bodies {
                    out.clear();
                    tree.query_near_into(Circle::new(body.position, 16.0), &mut out);
                    total += out.len();
                }
                black_box(total)
            })
        });

        group.bench_function(format!("query_range_window_n{}", n), |b| {
            let window = Rect::new(512.0, 512.0, 1024.0, 1024.0);
            b.iter(|| black_box(tree.query_range(window).count()))
        });
    }
    group.finish();
}

fn bench_move_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_move");
    let bodies = gen_uniform_bodies(5_000, 4.0);
    let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
    let moved: Vec<_> = bodies
        .iter()
        .map(|b| {
            let step = ((rng.next_f64() - 0.5) * 8.0, (rng.next_f64() - 0.5) * 8.0);
            let p = b.position + step;
            b.moved_to(Point::new(
                p.x.clamp(b.radius, WORLD - b.radius),
                p.y.clamp(b.radius, WORLD - b.radius),
            ))
        })
        .collect();
    group.throughput(Throughput::Elements(moved.len() as u64));

    group.bench_function("remove_insert_n5000", |b| {
        b.iter_batched(
            || build(&bodies),
            |mut t| {
                for m in &moved {
                    t.remove(m.id);
                    t.insert(*m);
                }
                black_box(t)
            },
            BatchSize::LargeInput,
        )
    });

    group.bench_function("purge_insert_n5000", |b| {
        b.iter_batched(
            || build(&bodies),
            |mut t| {
                for m in &moved {
                    t.purge(m.id);
                    t.insert(*m);
                }
                black_box(t)
            },
            BatchSize::LargeInput,
        )
    });

    group.bench_function("rebuild_n5000", |b| {
        b.iter(|| black_box(build(&moved)))
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_queries, bench_move_cycle);
criterion_main!(benches);
