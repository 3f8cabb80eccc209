// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style tree basics.
//!
//! Build a small tree, refresh it from a child, and watch the applicator
//! notifications arrive only for boxes that actually changed.
//!
//! Run:
//! - `cargo run -p lattice_demos --example style_tree_basics`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Rect;
use lattice_style_tree::{Applicator, NodeId, Style, Tree, Viewport};

/// Splits the viewport into equal-width columns, one per child.
struct Columns;

impl Style for Columns {
    fn layout(&self, tree: &mut Tree, root: NodeId, viewport: Viewport) {
        let children = tree.children(root).to_vec();
        let layout = tree.layout_mut(root).unwrap();
        layout.set_content_width(viewport.width);
        layout.set_content_height(viewport.height);
        let share = viewport.width / children.len() as f64;
        for (i, child) in children.into_iter().enumerate() {
            let layout = tree.layout_mut(child).unwrap();
            layout.set_content_left(share * i as f64);
            layout.set_content_width(share);
            layout.set_content_height(viewport.height);
        }
    }
}

/// Prints each notification and remembers how many arrived.
struct Printer {
    name: &'static str,
    count: RefCell<usize>,
}

impl Printer {
    fn new(name: &'static str) -> Rc<Self> {
        Rc::new(Self {
            name,
            count: RefCell::new(0),
        })
    }
}

impl Applicator for Printer {
    fn set_bounds(&self, tree: &Tree, node: NodeId) {
        *self.count.borrow_mut() += 1;
        let rect: Rect = tree.layout(node).unwrap().content_rect();
        println!("{}: bounds set to {rect:?}", self.name);
    }
}

fn main() {
    let mut tree = Tree::new();
    let style: Rc<dyn Style> = Rc::new(Columns);

    let left_printer = Printer::new("left");
    let right_printer = Printer::new("right");
    let root_printer = Printer::new("root");

    let left: Rc<dyn Applicator> = Rc::<Printer>::clone(&left_printer);
    let right: Rc<dyn Applicator> = Rc::<Printer>::clone(&right_printer);
    let root_app: Rc<dyn Applicator> = Rc::<Printer>::clone(&root_printer);

    let a = tree.insert_leaf(Rc::clone(&style), Some(left));
    let b = tree.insert_leaf(Rc::clone(&style), Some(right));
    let root = tree.insert_container(style, &[a, b], Some(root_app)).unwrap();

    // Refresh from a child: layout is still computed from the root.
    tree.refresh(a, Viewport::new(640.0, 480.0));

    // Same viewport again: nothing changed, nobody is notified.
    tree.refresh(root, Viewport::new(640.0, 480.0));

    // Narrower viewport: everything moves, everyone is notified once more.
    tree.refresh(root, Viewport::new(320.0, 480.0));

    println!(
        "notifications: root={} left={} right={}",
        root_printer.count.borrow(),
        left_printer.count.borrow(),
        right_printer.count.borrow()
    );
    assert_eq!(*root_printer.count.borrow(), 2);
    assert_eq!(*left_printer.count.borrow(), 2);
    assert_eq!(*right_printer.count.borrow(), 2);
}
