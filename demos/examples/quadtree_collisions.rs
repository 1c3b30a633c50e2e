// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collision candidates for a moving body.
//!
//! Spawns entities at random, then steers one of them across the world frame by frame.
//! Each frame the mover is re-inserted and the quadtree supplies broad-phase candidates,
//! which are narrowed with an exact circle test and checked against a brute-force scan.
//!
//! Run:
//! - `cargo run -p understory_examples --example quadtree_collisions`
//! - `cargo run -p understory_examples --example quadtree_collisions -- 2000`

use std::cell::Cell;
use std::collections::BTreeSet;

use kurbo::{Point, Rect, Vec2};
use tracing_subscriber::EnvFilter;
use understory_quadtree::{ObjectId, QuadTree, SpatialObject};

const FRAME_DT: f64 = 1.0 / 60.0;
const SPEED: f64 = 3.0;

struct Entity {
    id: ObjectId,
    pos: Cell<Point>,
    scale: f64,
}

impl SpatialObject for Entity {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn position(&self) -> Point {
        self.pos.get()
    }

    fn radius(&self) -> f64 {
        self.scale / 2.0
    }
}

fn collides(a: &Entity, b: &Entity) -> bool {
    let d = a.position() - b.position();
    let reach = a.radius() + b.radius();
    d.hypot2() < reach * reach
}

struct Rng(u64);

impl Rng {
    fn next_f64(&mut self) -> f64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        ((x >> 11) as f64) / ((1u64 << 53) as f64)
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let spawn_count: u64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(400);

    let world = Rect::new(-20.0, -20.0, 20.0, 20.0);
    let mut rng = Rng(0x5EED_1234_ABCD_0042);
    let entities: Vec<Entity> = (0..spawn_count)
        .map(|id| Entity {
            id,
            pos: Cell::new(Point::new(
                rng.range(world.x0, world.x1),
                rng.range(world.y0, world.y1),
            )),
            scale: rng.range(0.25, 0.5),
        })
        .collect();

    let mut tree = QuadTree::new(world, 4, 5);
    for e in &entities {
        tree.insert(e);
    }
    println!("spawned {spawn_count} entities: {:?}", tree.stats());

    let Some(mover) = entities.last() else {
        return;
    };
    // Start in the top-left so the whole path stays inside the world.
    tree.remove(mover.id);
    mover.pos.set(Point::new(-10.0, -10.0));
    tree.insert(mover);

    // Steer right for a while, then down, like holding D then S.
    let steps = [(Vec2::new(1.0, 0.0), 300), (Vec2::new(0.0, 1.0), 300)];

    let mut frame = 0;
    for (dir, frames) in steps {
        for _ in 0..frames {
            let next = mover.position() + dir * (SPEED * FRAME_DT);
            tree.remove(mover.id);
            mover.pos.set(next);
            tree.insert(mover);

            // Borrows `tree`, so it cannot outlive this frame's remove/insert.
            let mut candidates = Vec::new();
            tree.query_near_into(mover.footprint(), &mut candidates);
            let narrowed: BTreeSet<ObjectId> = candidates
                .iter()
                .filter(|c| c.id != mover.id && collides(mover, c))
                .map(|c| c.id)
                .collect();

            let brute: BTreeSet<ObjectId> = entities
                .iter()
                .filter(|e| e.id != mover.id && collides(mover, e))
                .map(|e| e.id)
                .collect();
            assert_eq!(narrowed, brute, "broad phase missed a collision");

            if frame % 60 == 0 || !narrowed.is_empty() {
                println!(
                    "frame {frame:4} at ({:6.2}, {:6.2}): {} candidates, colliding with {:?}",
                    mover.position().x,
                    mover.position().y,
                    candidates.len(),
                    narrowed
                );
            }
            frame += 1;
        }
    }

    println!("final: {:?}", tree.stats());
}
