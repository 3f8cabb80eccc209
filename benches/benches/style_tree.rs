// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use lattice_style_tree::{Applicator, NodeId, Style, Tree, Viewport};
use std::cell::Cell;
use std::rc::Rc;

/// Style that computes nothing; attachment benchmarks only exercise the tree.
struct Inert;

impl Style for Inert {
    fn layout(&self, _tree: &mut Tree, _root: NodeId, _viewport: Viewport) {}
}

/// Splits the viewport width evenly among the root's children.
struct EvenSplit;

impl Style for EvenSplit {
    fn layout(&self, tree: &mut Tree, root: NodeId, viewport: Viewport) {
        let children = tree.children(root).to_vec();
        let layout = tree.layout_mut(root).unwrap();
        layout.set_content_width(viewport.width);
        layout.set_content_height(viewport.height);
        let share = viewport.width / children.len() as f64;
        for (i, child) in children.into_iter().enumerate() {
            let layout = tree.layout_mut(child).unwrap();
            layout.set_content_width(share);
            layout.set_content_height(viewport.height);
            layout.set_content_left(share * i as f64);
        }
    }
}

/// Applicator that only counts notifications.
#[derive(Default)]
struct Sink {
    notified: Cell<u64>,
}

impl Applicator for Sink {
    fn set_bounds(&self, _tree: &Tree, _node: NodeId) {
        self.notified.set(self.notified.get() + 1);
    }
}

/// Chain of `depth` containers plus a detached container to reparent under.
fn deep_chain(depth: usize) -> (Tree, NodeId, NodeId) {
    let mut tree = Tree::new();
    let style: Rc<dyn Style> = Rc::new(Inert);
    let top = tree.insert_container(Rc::clone(&style), &[], None).unwrap();
    let mut cursor = top;
    for _ in 1..depth {
        let next = tree.insert_container(Rc::clone(&style), &[], None).unwrap();
        tree.add(cursor, next).unwrap();
        cursor = next;
    }
    let new_root = tree.insert_container(style, &[], None).unwrap();
    (tree, new_root, top)
}

/// Reparenting a deep chain forces root propagation over the whole subtree.
fn bench_reparent(c: &mut Criterion) {
    let mut group = c.benchmark_group("reparent");
    for depth in [64_usize, 512, 4096] {
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_function(format!("deep_chain_{depth}"), |b| {
            b.iter_batched(
                || deep_chain(depth),
                |(mut tree, new_root, top)| {
                    tree.add(new_root, top).unwrap();
                    black_box(tree)
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

/// Full refresh over a wide tree: layout writes plus the notification sweep.
fn bench_refresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("refresh");
    for width in [16_usize, 256, 1024] {
        group.throughput(Throughput::Elements(width as u64));
        group.bench_function(format!("wide_{width}"), |b| {
            let mut tree = Tree::new();
            let style: Rc<dyn Style> = Rc::new(EvenSplit);
            let mut children = Vec::with_capacity(width);
            for _ in 0..width {
                let applicator: Rc<dyn Applicator> = Rc::new(Sink::default());
                children.push(tree.insert_leaf(Rc::clone(&style), Some(applicator)));
            }
            let root = tree.insert_container(style, &children, None).unwrap();
            // Alternate viewports so every pass changes values and notifies.
            let mut flip = false;
            b.iter(|| {
                flip = !flip;
                let width = if flip { 1024.0 } else { 512.0 };
                tree.refresh(black_box(root), Viewport::new(width, 768.0));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reparent, bench_refresh);
criterion_main!(benches);
