// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: attachment, root caching, refresh.

use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::style::{Applicator, Style};
use crate::types::{Error, LayoutBox, NodeId, Viewport};

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Arena of style-driven nodes.
///
/// The tree owns every node: its style handle, its optional applicator, its
/// owned [`LayoutBox`], and (for containers) its ordered children list.
/// `parent` and `root` are non-owning [`NodeId`] back-references; `root` is a
/// cached denormalized field updated eagerly on every attach/detach so that
/// [`Tree::refresh`] can locate the root in O(1) from any node.
pub struct Tree {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

struct Node {
    generation: u32,
    parent: Option<NodeId>,
    root: NodeId,
    // None means the node was constructed without children capability and
    // stays a leaf for its whole lifetime.
    children: Option<Vec<NodeId>>,
    style: Rc<dyn Style>,
    applicator: Option<Rc<dyn Applicator>>,
    layout: LayoutBox,
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a permanent leaf: a node that can never be given children.
    ///
    /// The node starts unattached, so it is its own root.
    pub fn insert_leaf(
        &mut self,
        style: Rc<dyn Style>,
        applicator: Option<Rc<dyn Applicator>>,
    ) -> NodeId {
        self.alloc(style, None, applicator)
    }

    /// Insert a children-capable node and attach `children` to it in order.
    ///
    /// An empty `children` slice still produces a container; leaf-vs-container
    /// is fixed at construction. Each child is attached with [`Tree::add`]
    /// semantics, including detaching it from any current parent.
    ///
    /// Errors with [`Error::Dangling`] if any child id is stale; nothing is
    /// allocated in that case.
    pub fn insert_container(
        &mut self,
        style: Rc<dyn Style>,
        children: &[NodeId],
        applicator: Option<Rc<dyn Applicator>>,
    ) -> Result<NodeId, Error> {
        for &child in children {
            self.ensure_alive(child)?;
        }
        let id = self.alloc(style, Some(Vec::with_capacity(children.len())), applicator);
        for &child in children {
            // The node is freshly allocated and unattached, so attachment
            // cannot fail or cycle here.
            self.add(id, child)?;
        }
        Ok(id)
    }

    /// Append `child` to the end of `parent`'s children.
    ///
    /// A child currently attached elsewhere is detached from its old parent
    /// first; a node is never in two children lists at once. The cached root
    /// of `child` and of every node in its subtree becomes `parent`'s root.
    ///
    /// Errors: [`Error::CannotHaveChildren`] if `parent` is a leaf,
    /// [`Error::Dangling`] on stale ids, [`Error::Cycle`] if `child` is
    /// `parent` or one of its ancestors.
    pub fn add(&mut self, parent: NodeId, child: NodeId) -> Result<(), Error> {
        self.insert(parent, usize::MAX, child)
    }

    /// Attach `child` at `index` in `parent`'s children.
    ///
    /// Existing children at or after `index` shift right. Indices past the
    /// end append. Otherwise identical to [`Tree::add`].
    pub fn insert(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<(), Error> {
        self.ensure_alive(parent)?;
        self.ensure_alive(child)?;
        if self.node(parent).children.is_none() {
            return Err(Error::CannotHaveChildren(parent));
        }
        // Refuse to attach a node beneath its own subtree.
        let mut cursor = Some(parent);
        while let Some(n) = cursor {
            if n == child {
                return Err(Error::Cycle {
                    ancestor: child,
                    descendant: parent,
                });
            }
            cursor = self.node(n).parent;
        }

        if let Some(old_parent) = self.node(child).parent {
            self.unlink(old_parent, child);
        }
        let children = self
            .node_mut(parent)
            .children
            .as_mut()
            .expect("checked container above");
        let at = index.min(children.len());
        children.insert(at, child);
        self.node_mut(child).parent = Some(parent);
        let root = self.node(parent).root;
        self.propagate_root(child, root);
        Ok(())
    }

    /// Detach `child` from `parent` without destroying it.
    ///
    /// The detached child becomes the root of its own subtree; the cached
    /// roots of all its descendants are updated accordingly.
    ///
    /// Errors with [`Error::NotAChild`] if `child` is not currently a child
    /// of `parent`, and [`Error::Dangling`] on stale ids.
    pub fn remove(&mut self, parent: NodeId, child: NodeId) -> Result<(), Error> {
        self.ensure_alive(parent)?;
        self.ensure_alive(child)?;
        if self.node(child).parent != Some(parent) {
            return Err(Error::NotAChild { parent, child });
        }
        self.unlink(parent, child);
        self.propagate_root(child, child);
        Ok(())
    }

    /// Detach every child of `node`, each becoming its own root.
    ///
    /// No-op on leaves and stale ids; clearing nothing is not an error.
    pub fn clear(&mut self, node: NodeId) {
        if !self.is_alive(node) {
            return;
        }
        let Some(children) = self.node_mut(node).children.as_mut() else {
            return;
        };
        let detached = core::mem::take(children);
        for child in detached {
            self.node_mut(child).parent = None;
            self.propagate_root(child, child);
        }
    }

    /// Destroy `node` and its whole subtree, freeing their slots for reuse.
    ///
    /// Ids into the destroyed subtree become stale. No-op on stale ids.
    pub fn destroy(&mut self, node: NodeId) {
        if !self.is_alive(node) {
            return;
        }
        if let Some(parent) = self.node(node).parent {
            self.unlink(parent, node);
        }
        self.free_recursive(node);
    }

    /// Recompute layout for the tree containing `node`.
    ///
    /// The computation is always rooted: the cached root is looked up and its
    /// [`Style::layout`] is invoked with the root and the supplied viewport,
    /// no matter which node triggered the refresh. Viewport resolution below
    /// the root is meaningless, so the caller-supplied value is handed to the
    /// root's style as-is.
    ///
    /// After the style returns, every node whose box recorded at least one
    /// differing write is drained, and those with an applicator receive
    /// exactly one [`Applicator::set_bounds`] call before `refresh` returns.
    /// No-op on stale ids.
    pub fn refresh(&mut self, node: NodeId, viewport: Viewport) {
        let Some(root) = self.root(node) else {
            return;
        };
        let style = Rc::clone(&self.node(root).style);
        style.layout(self, root, viewport);
        self.notify();
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is live if its slot exists and its generation matches the
    /// current generation stored in that slot. See [`NodeId`] for the
    /// generational semantics.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// The parent of `id`, or `None` if it is unattached or stale.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// The cached root of `id`'s tree, or `None` if `id` is stale.
    ///
    /// O(1); kept consistent eagerly by every attach/detach rather than
    /// recomputed by walking parent links. An unattached node is its own
    /// root.
    pub fn root(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).map(|n| n.root)
    }

    /// The ordered children of `id`. Empty for leaves and stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id)
            .and_then(|n| n.children.as_deref())
            .unwrap_or(&[])
    }

    /// True iff `id` was constructed with children capability.
    ///
    /// Fixed for the node's lifetime; a container with no children currently
    /// attached still reports true. False for stale ids.
    pub fn can_have_children(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some_and(|n| n.children.is_some())
    }

    /// The computed layout box of `id`, or `None` if `id` is stale.
    pub fn layout(&self, id: NodeId) -> Option<&LayoutBox> {
        self.node_opt(id).map(|n| &n.layout)
    }

    /// Mutable access to the layout box of `id`.
    ///
    /// This is the write surface a [`Style`] uses during layout; every write
    /// through it is change-tracked.
    pub fn layout_mut(&mut self, id: NodeId) -> Option<&mut LayoutBox> {
        self.node_opt_mut(id).map(|n| &mut n.layout)
    }

    // --- internals ---

    fn alloc(
        &mut self,
        style: Rc<dyn Style>,
        children: Option<Vec<NodeId>>,
        applicator: Option<Rc<dyn Applicator>>,
    ) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(None);
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        self.nodes[id.idx()] = Some(Node {
            generation,
            parent: None,
            root: id,
            children,
            style,
            applicator,
            layout: LayoutBox::default(),
        });
        id
    }

    fn ensure_alive(&self, id: NodeId) -> Result<(), Error> {
        if self.is_alive(id) {
            Ok(())
        } else {
            Err(Error::Dangling(id))
        }
    }

    /// Access a node; panics if `id` is stale. Callers check liveness first.
    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn unlink(&mut self, parent: NodeId, child: NodeId) {
        let p = self.node_mut(parent);
        if let Some(children) = p.children.as_mut() {
            children.retain(|c| *c != child);
        }
        self.node_mut(child).parent = None;
    }

    /// Eagerly rewrite the cached root across a whole subtree. The cost of
    /// attach/detach lives here so that root lookup stays O(1).
    fn propagate_root(&mut self, id: NodeId, root: NodeId) {
        self.node_mut(id).root = root;
        let children = match &self.node(id).children {
            Some(c) => c.clone(),
            None => return,
        };
        for child in children {
            self.propagate_root(child, root);
        }
    }

    fn free_recursive(&mut self, id: NodeId) {
        let children = self.node(id).children.clone().unwrap_or_default();
        for child in children {
            self.free_recursive(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// One notification sweep: drain every changed box, then call each
    /// affected node's applicator exactly once. Nodes without an applicator
    /// drain silently.
    fn notify(&mut self) {
        let mut pending: Vec<(NodeId, Rc<dyn Applicator>)> = Vec::new();
        for (idx, slot) in self.nodes.iter_mut().enumerate() {
            let Some(node) = slot else { continue };
            if node.layout.take_changed().is_empty() {
                continue;
            }
            if let Some(applicator) = &node.applicator {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "NodeId uses 32-bit indices by design."
                )]
                pending.push((NodeId::new(idx as u32, node.generation), Rc::clone(applicator)));
            }
        }
        for (id, applicator) in pending {
            applicator.set_bounds(self, id);
        }
    }
}
