// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The two injection seams of the tree: [`Style`] computes layout boxes,
//! [`Applicator`] applies observed changes to a rendering backend.

use crate::tree::Tree;
use crate::types::{NodeId, Viewport};

/// Pluggable layout strategy.
///
/// A style is assigned to a node at construction and never replaced. When any
/// node in a tree is refreshed, the *root's* style is invoked with the root
/// and the supplied viewport; which nodes of the subtree it measures, and in
/// what order, is entirely its own business. The tree itself never recurses
/// during a refresh.
///
/// A style writes results through [`Tree::layout_mut`]; every write is
/// subject to the change-tracked notification rule described on
/// [`LayoutBox`](crate::LayoutBox).
///
/// Failures inside `layout` are not translated by the tree: a panic unwinds
/// through [`Tree::refresh`](Tree::refresh) to its caller.
pub trait Style {
    /// Compute layout boxes for (some of) the subtree under `root`.
    fn layout(&self, tree: &mut Tree, root: NodeId, viewport: Viewport);
}

/// Capability notified when a node's layout box actually changed.
///
/// Assigned to a node at construction, optional, and never replaced. After a
/// refresh pass, each node whose box recorded at least one differing field
/// write receives exactly one `set_bounds` call — not one per field. Nodes
/// whose style wrote only already-current values are not notified at all.
///
/// The applicator reads the node's current box values itself via
/// [`Tree::layout`]; the tree does not push individual changed values.
pub trait Applicator {
    /// Apply the node's current layout box to the rendering side.
    fn set_bounds(&self, tree: &Tree, node: NodeId);
}
