// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the style tree: node identifiers, viewports, the
//! change-tracked layout box, and the error taxonomy.

use kurbo::{Rect, Size};

/// Identifier for a node in the tree.
///
/// A small, copyable handle consisting of a slot index and a generation
/// counter. It stays stable across tree mutations but becomes invalid when
/// the underlying slot is freed by [`Tree::destroy`](crate::Tree::destroy).
///
/// ## Semantics
///
/// - On insertion, a fresh slot is allocated with generation `1`.
/// - On destruction, the slot is freed; any `NodeId` pointing to it is stale.
/// - On reuse of a freed slot, its generation is incremented, producing a
///   distinct `NodeId`. Stale ids never alias a different live node because
///   the generation must match.
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `NodeId`
/// still refers to a live node. Operations taking stale ids either return
/// [`Error::Dangling`] or are documented no-ops.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Available drawing area handed to a layout pass.
///
/// A plain immutable value; callers construct a fresh one per
/// [`Tree::refresh`](crate::Tree::refresh) call. It has no identity beyond
/// value equality and is never retained by the tree.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Available width.
    pub width: f64,
    /// Available height.
    pub height: f64,
}

impl Viewport {
    /// Create a viewport from an available width and height.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The available area as a [`Size`].
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

bitflags::bitflags! {
    /// Set of [`LayoutBox`] fields whose values changed since the last
    /// notification sweep.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub(crate) struct BoxField: u8 {
        const CONTENT_WIDTH  = 0b0000_0001;
        const CONTENT_HEIGHT = 0b0000_0010;
        const CONTENT_LEFT   = 0b0000_0100;
        const CONTENT_TOP    = 0b0000_1000;
    }
}

/// Computed layout results for one node.
///
/// Every node owns exactly one `LayoutBox`, created with the node and written
/// by a [`Style`](crate::Style) during layout. Writes are change-tracked:
/// a setter that stores a value equal to the current one is a no-op, while a
/// differing write records the field in a changed-set. The tree drains each
/// node's changed-set once per refresh pass and notifies the node's
/// [`Applicator`](crate::Applicator), if any, at most once — regardless of
/// how many fields changed.
///
/// `content_left`/`content_top` position the content box relative to the
/// parent's content box; the root's offsets are relative to the viewport
/// origin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutBox {
    content_width: f64,
    content_height: f64,
    content_left: f64,
    content_top: f64,
    changed: BoxField,
}

impl LayoutBox {
    /// Width of the content box.
    pub const fn content_width(&self) -> f64 {
        self.content_width
    }

    /// Height of the content box.
    pub const fn content_height(&self) -> f64 {
        self.content_height
    }

    /// Horizontal offset of the content box within the parent.
    pub const fn content_left(&self) -> f64 {
        self.content_left
    }

    /// Vertical offset of the content box within the parent.
    pub const fn content_top(&self) -> f64 {
        self.content_top
    }

    /// The content box size as a [`Size`].
    pub const fn content_size(&self) -> Size {
        Size::new(self.content_width, self.content_height)
    }

    /// The content box as a parent-relative [`Rect`].
    pub fn content_rect(&self) -> Rect {
        Rect::new(
            self.content_left,
            self.content_top,
            self.content_left + self.content_width,
            self.content_top + self.content_height,
        )
    }

    /// Set the content width, recording a change if the value differs.
    pub fn set_content_width(&mut self, value: f64) {
        if value != self.content_width {
            self.content_width = value;
            self.changed |= BoxField::CONTENT_WIDTH;
        }
    }

    /// Set the content height, recording a change if the value differs.
    pub fn set_content_height(&mut self, value: f64) {
        if value != self.content_height {
            self.content_height = value;
            self.changed |= BoxField::CONTENT_HEIGHT;
        }
    }

    /// Set the content left offset, recording a change if the value differs.
    pub fn set_content_left(&mut self, value: f64) {
        if value != self.content_left {
            self.content_left = value;
            self.changed |= BoxField::CONTENT_LEFT;
        }
    }

    /// Set the content top offset, recording a change if the value differs.
    pub fn set_content_top(&mut self, value: f64) {
        if value != self.content_top {
            self.content_top = value;
            self.changed |= BoxField::CONTENT_TOP;
        }
    }

    /// Drain the changed-set, returning the fields written since the last
    /// drain. At most one notification is derived from each drain.
    pub(crate) fn take_changed(&mut self) -> BoxField {
        core::mem::take(&mut self.changed)
    }
}

/// Errors raised by tree attachment operations.
///
/// These are programmer errors rather than recoverable runtime conditions;
/// callers uncertain about a node's shape should check
/// [`Tree::can_have_children`](crate::Tree::can_have_children) or the
/// children list first. A failed operation leaves the tree unchanged.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// `add`/`insert` was called on a node constructed without children
    /// capability.
    #[error("node {0:?} is a leaf and cannot have children")]
    CannotHaveChildren(NodeId),
    /// `remove` was called with a node that is not currently a child of the
    /// given parent.
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild {
        /// The receiver of the `remove` call.
        parent: NodeId,
        /// The node that was not among the receiver's children.
        child: NodeId,
    },
    /// An operation was given a stale id whose slot has been freed.
    #[error("node {0:?} is no longer alive")]
    Dangling(NodeId),
    /// An attachment would have closed a cycle.
    #[error("node {ancestor:?} cannot be attached under its own descendant {descendant:?}")]
    Cycle {
        /// The node that was to be attached; an ancestor of the attachment
        /// point.
        ancestor: NodeId,
        /// The attachment point, which lies inside `ancestor`'s subtree.
        descendant: NodeId,
    },
}
