// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Circle, Point, Rect};
use understory_quadtree::{Body, QuadTree};

use rstar::RTree;
use rstar::primitives::GeomWithData;

const WORLD: f64 = 2048.0;
const PROBE_RADIUS: f64 = 16.0;

fn gen_grid_bodies(n: u64, cell: f64) -> Vec<Body> {
    let mut out = Vec::new();
    for y in 0..n {
        for x in 0..n {
            let p = Point::new((x as f64 + 0.5) * cell, (y as f64 + 0.5) * cell);
            out.push(Body::new(y * n + x, p, cell * 0.25));
        }
    }
    out
}

fn to_rstar_points(v: &[Body]) -> Vec<GeomWithData<[f64; 2], u64>> {
    v.iter()
        .map(|b| GeomWithData::new([b.position.x, b.position.y], b.id))
        .collect()
}

// Both sides do a full narrow phase and count each object once per probe. The quadtree
// reports one candidate per residency, so its hits are deduplicated by id.
fn bench_rstar_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("rstar_external_compare");
    for &n in &[32u64, 64] {
        let cell = WORLD / n as f64;
        let bodies = gen_grid_bodies(n, cell);
        let probes: Vec<_> = bodies.iter().step_by(7).map(|b| b.position).collect();
        group.throughput(Throughput::Elements(probes.len() as u64));

        group.bench_function(format!("quadtree_build_near_n{}", n), |b| {
            b.iter_batched(
                || QuadTree::new(Rect::new(0.0, 0.0, WORLD, WORLD), 8, 8),
                |mut tree| {
                    for body in &bodies {
                        tree.insert(*body);
                    }
                    let mut hits = 0;
                    let mut ids = Vec::new();
                    for p in &probes {
                        ids.clear();
                        ids.extend(
                            tree.query_near(Circle::new(*p, PROBE_RADIUS))
                                .filter(|o| o.position.distance(*p) <= PROBE_RADIUS)
                                .map(|o| o.id),
                        );
                        ids.sort_unstable();
                        ids.dedup();
                        hits += ids.len();
                    }
                    black_box(hits);
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("rstar_build_near_bulk_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_points(&bodies),
                |points| {
                    let tree = RTree::bulk_load(points);
                    let mut hits = 0;
                    for p in &probes {
                        hits += tree
                            .locate_within_distance([p.x, p.y], PROBE_RADIUS * PROBE_RADIUS)
                            .count();
                    }
                    black_box(hits);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rstar_external_compare);
criterion_main!(benches);
