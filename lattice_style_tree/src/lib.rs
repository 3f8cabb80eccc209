// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=lattice_style_tree --heading-base-level=0

//! Lattice Style Tree: the layout/attachment core of a style-and-box model.
//!
//! Lattice Style Tree is a reusable building block for UI toolkits that need
//! to position visual elements without committing to a layout algorithm or a
//! rendering backend.
//!
//! - Represents a mutable tree of nodes with parent/child/root bookkeeping
//!   kept correct under arbitrary attach/detach/reparent operations.
//! - Drives box computation through a pluggable per-node [`Style`] strategy.
//! - Tracks every box write and notifies an external [`Applicator`] only when
//!   a dimension actually changed, at most once per node per refresh pass.
//! - Always recomputes layout from the tree root, no matter which node
//!   triggered the [`Tree::refresh`].
//!
//! ## Where this fits
//!
//! This crate is the attachment layer between a widget tree and whatever
//! computes and consumes geometry. It deliberately is *not* a layout engine:
//! the algorithm that assigns sizes lives entirely in the injected [`Style`],
//! and the side effects of a size change (moving a real widget) live entirely
//! in the injected [`Applicator`]. The tree contributes the two things with
//! nontrivial invariants: cached-root consistency and change-tracked,
//! batched notification.
//!
//! ## API overview
//!
//! - [`Tree`]: arena owning every node; all operations go through it.
//! - [`NodeId`]: generational handle of a node.
//! - [`LayoutBox`]: change-tracked computed-layout record, one per node.
//! - [`Viewport`]: immutable available-area value supplied per refresh.
//! - [`Style`] / [`Applicator`]: the two injection seams.
//! - [`Error`]: the invalid-operation taxonomy of the attachment surface.
//!
//! Key operations:
//! - [`Tree::insert_leaf`] / [`Tree::insert_container`] → [`NodeId`]
//! - [`Tree::add`] / [`Tree::insert`] / [`Tree::remove`] / [`Tree::clear`]
//! - [`Tree::refresh`] → rooted layout plus one notification sweep.
//!
//! ## Concurrency
//!
//! Single-threaded and synchronous by design: `refresh` returns only after
//! every notification has fired, and there is no suspension point anywhere.
//! Styles and applicators are held as `Rc` handles; wrap the whole tree in a
//! lock if you must mutate it from several threads.
//!
//! ## Minimal usage
//!
//! ```
//! use std::rc::Rc;
//! use lattice_style_tree::{NodeId, Style, Tree, Viewport};
//!
//! // A style that allocates twice the viewport to the root node.
//! struct Double;
//!
//! impl Style for Double {
//!     fn layout(&self, tree: &mut Tree, root: NodeId, viewport: Viewport) {
//!         let layout = tree.layout_mut(root).unwrap();
//!         layout.set_content_width(viewport.width * 2.0);
//!         layout.set_content_height(viewport.height * 2.0);
//!     }
//! }
//!
//! let mut tree = Tree::new();
//! let style: Rc<dyn Style> = Rc::new(Double);
//! let child = tree.insert_leaf(Rc::clone(&style), None);
//! let root = tree.insert_container(style, &[child], None).unwrap();
//!
//! // Refreshing from the child still lays out from the root.
//! tree.refresh(child, Viewport::new(10.0, 20.0));
//! assert_eq!(tree.layout(root).unwrap().content_width(), 20.0);
//! assert_eq!(tree.layout(root).unwrap().content_height(), 40.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod style;
mod tree;
mod types;

pub use style::{Applicator, Style};
pub use tree::Tree;
pub use types::{Error, LayoutBox, NodeId, Viewport};
