// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree basics.
//!
//! Insert a few bodies, watch the root split, query by range and by disc, and see how
//! `remove` and `purge` differ for an object that straddles the center.
//!
//! Run:
//! - `cargo run -p understory_examples --example quadtree_basics`
//! - `RUST_LOG=understory_quadtree=trace cargo run -p understory_examples --example quadtree_basics`

use kurbo::{Circle, Point, Rect};
use tracing_subscriber::EnvFilter;
use understory_quadtree::{Body, QuadTree, QuadTreeConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = QuadTreeConfig::default()
        .with_boundary(Rect::new(0.0, 0.0, 100.0, 100.0))
        .with_capacity(2)
        .with_max_depth(3);
    let mut tree = match QuadTree::from_config(&config) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("bad config: {err}");
            return;
        }
    };

    let a = Body::new(1, Point::new(10.0, 10.0), 1.0);
    let b = Body::new(2, Point::new(12.0, 12.0), 1.0);
    let c = Body::new(3, Point::new(90.0, 90.0), 1.0);
    for body in [a, b, c] {
        tree.insert(body);
    }
    println!("after A, B, C: {:?}", tree.stats());

    // D straddles the center and lands in all four children.
    let d = Body::new(4, Point::new(50.0, 50.0), 10.0);
    tree.insert(d);
    for node in tree.nodes() {
        let ids: Vec<_> = node.residents().map(|o| o.id).collect();
        println!(
            "{:indent$}level {} {:?} -> {:?}",
            "",
            node.level(),
            node.boundary(),
            ids,
            indent = node.level() as usize * 2
        );
    }

    let in_top_left: Vec<_> = tree
        .query_range(Rect::new(0.0, 0.0, 50.0, 50.0))
        .map(|o| o.id)
        .collect();
    println!("centers in top-left quadrant: {in_top_left:?}");

    let probe = Circle::new(Point::new(50.0, 50.0), 1.0);
    let count_d = |tree: &QuadTree<Body>| tree.query_near(probe).filter(|o| o.id == d.id).count();
    println!("D near the center: {} hits", count_d(&tree));

    tree.remove(d.id);
    println!("after remove(D): {} hits", count_d(&tree));

    let purged = tree.purge(d.id);
    println!("purge(D) dropped {purged} more, now {} hits", count_d(&tree));

    tree.clear();
    println!("after clear: {:?}", tree);
}
