// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw a quadtree's node boundaries as ASCII art.
//!
//! Every node boundary is traced onto a character grid, and body centers are marked
//! with `o`. This is a handy way to see how a distribution subdivides.
//!
//! Run:
//! - `cargo run -p understory_examples --example quadtree_dump`

use kurbo::{Point, Rect};
use understory_quadtree::{Body, QuadTree};

const COLS: usize = 64;
const ROWS: usize = 32;

fn main() {
    let world = Rect::new(0.0, 0.0, 256.0, 256.0);
    let mut tree = QuadTree::new(world, 2, 5);

    // A tight cluster near the top-left and a sparse diagonal.
    let mut id = 0;
    for i in 0..12 {
        let t = f64::from(i);
        tree.insert(Body::new(id, Point::new(20.0 + 3.0 * t, 24.0 + 2.0 * t), 1.5));
        id += 1;
    }
    for i in 0..6 {
        let t = f64::from(i);
        tree.insert(Body::new(id, Point::new(100.0 + 25.0 * t, 100.0 + 25.0 * t), 4.0));
        id += 1;
    }

    let mut grid = vec![[' '; COLS]; ROWS];
    let to_cell = |p: Point| {
        let cx = ((p.x - world.x0) / world.width() * (COLS - 1) as f64).round() as usize;
        let cy = ((p.y - world.y0) / world.height() * (ROWS - 1) as f64).round() as usize;
        (cx.min(COLS - 1), cy.min(ROWS - 1))
    };

    for node in tree.nodes() {
        let b = node.boundary();
        let (x0, y0) = to_cell(Point::new(b.x0, b.y0));
        let (x1, y1) = to_cell(Point::new(b.x1, b.y1));
        for x in x0..=x1 {
            grid[y0][x] = '-';
            grid[y1][x] = '-';
        }
        for row in &mut grid[y0..=y1] {
            row[x0] = '|';
            row[x1] = '|';
        }
        for (x, y) in [(x0, y0), (x1, y0), (x0, y1), (x1, y1)] {
            grid[y][x] = '+';
        }
    }
    for node in tree.nodes() {
        for body in node.residents() {
            let (x, y) = to_cell(body.position);
            grid[y][x] = 'o';
        }
    }

    for row in &grid {
        println!("{}", row.iter().collect::<String>());
    }

    let stats = tree.stats();
    println!(
        "{} nodes ({} leaves), deepest level {}, {} residencies for {} bodies",
        stats.nodes, stats.leaves, stats.max_level, stats.residencies, id
    );
    for node in tree.nodes().filter(|n| n.is_leaf() && !n.is_empty()) {
        println!(
            "  level {} {:?}: {} resident(s)",
            node.level(),
            node.boundary(),
            node.len()
        );
    }
}
