//! Menu Tree Arena
//!
//! The server delivers the menu as nested JSON. [`MenuTree`] moves those
//! nodes into a flat arena indexed by id so that every traversal runs on an
//! explicit stack: rendering an adversarially deep tree never recurses.
//!
//! The tree is a disposable cache: it is rebuilt wholesale from every
//! `GET /api/menus` response and never patched in place.

use std::collections::{HashMap, HashSet};
use thiserror::Error;

use super::types::{MenuId, MenuNode};

/// Errors raised while building a [`MenuTree`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Duplicate menu id: {0}")]
    DuplicateId(MenuId),
}

#[derive(Debug, Clone)]
struct Slot {
    /// Node with `children` drained into `children` below
    node: MenuNode,
    parent: Option<usize>,
    children: Vec<usize>,
    depth: usize,
}

/// Arena of menu nodes indexed by id
#[derive(Debug, Clone, Default)]
pub struct MenuTree {
    slots: Vec<Slot>,
    index: HashMap<MenuId, usize>,
    roots: Vec<usize>,
}

/// One row of a flattened traversal
#[derive(Debug, Clone, Copy)]
pub struct TreeRow<'a> {
    pub node: &'a MenuNode,
    /// Root = 0, each nesting level +1
    pub depth: usize,
    pub has_children: bool,
}

impl TreeRow<'_> {
    /// Indentation in logical pixels: `base + depth * step`
    pub fn indent(&self, base: u32, step: u32) -> u32 {
        base + self.depth as u32 * step
    }
}

impl MenuTree {
    /// Empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Move a root-level sequence (with nested children) into the arena.
    ///
    /// Sibling order is kept exactly as received. A child whose `parentId`
    /// disagrees with its enclosing node is kept where the server put it and
    /// logged.
    pub fn from_roots(roots: Vec<MenuNode>) -> Result<Self, TreeError> {
        let mut tree = Self::new();

        // (node, parent slot) pairs, reversed so the first root pops first
        let mut stack: Vec<(MenuNode, Option<usize>)> =
            roots.into_iter().rev().map(|node| (node, None)).collect();

        while let Some((mut node, parent)) = stack.pop() {
            if tree.index.contains_key(&node.id) {
                return Err(TreeError::DuplicateId(node.id));
            }

            let children = std::mem::take(&mut node.children);
            let slot_id = tree.slots.len();
            let depth = parent.map(|p| tree.slots[p].depth + 1).unwrap_or(0);

            if let Some(p) = parent {
                let parent_id = &tree.slots[p].node.id;
                if node.parent_id.as_ref() != Some(parent_id) {
                    tracing::warn!(
                        menu_id = %node.id,
                        declared_parent = ?node.parent_id,
                        nested_under = %parent_id,
                        "Menu node parentId does not match its position in the tree"
                    );
                }
                tree.slots[p].children.push(slot_id);
            } else {
                if node.parent_id.is_some() {
                    tracing::warn!(
                        menu_id = %node.id,
                        declared_parent = ?node.parent_id,
                        "Root-level menu node declares a parent"
                    );
                }
                tree.roots.push(slot_id);
            }

            tree.index.insert(node.id.clone(), slot_id);
            tree.slots.push(Slot {
                node,
                parent,
                children: Vec::new(),
                depth,
            });

            for child in children.into_iter().rev() {
                stack.push((child, Some(slot_id)));
            }
        }

        Ok(tree)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Look up a node by id (its `children` field is always empty here)
    pub fn get(&self, id: &str) -> Option<&MenuNode> {
        self.index.get(id).map(|&i| &self.slots[i].node)
    }

    /// Depth of a node, root = 0
    pub fn depth(&self, id: &str) -> Option<usize> {
        self.index.get(id).map(|&i| self.slots[i].depth)
    }

    /// Root-level nodes in server order
    pub fn roots(&self) -> impl Iterator<Item = &MenuNode> {
        self.roots.iter().map(move |&i| &self.slots[i].node)
    }

    /// Children of a node in server order
    pub fn children(&self, id: &str) -> impl Iterator<Item = &MenuNode> {
        let children: &[usize] = match self.index.get(id) {
            Some(&i) => &self.slots[i].children,
            None => &[],
        };
        children.iter().map(move |&c| &self.slots[c].node)
    }

    pub fn has_children(&self, id: &str) -> bool {
        self.index
            .get(id)
            .map(|&i| !self.slots[i].children.is_empty())
            .unwrap_or(false)
    }

    /// Parent of a node, by position in the tree
    pub fn parent(&self, id: &str) -> Option<&MenuNode> {
        let i = *self.index.get(id)?;
        self.slots[i].parent.map(|p| &self.slots[p].node)
    }

    /// Ids from the node's parent up to its root
    pub fn ancestors(&self, id: &str) -> Vec<MenuId> {
        let mut out = Vec::new();
        let mut cursor = self.index.get(id).and_then(|&i| self.slots[i].parent);
        while let Some(p) = cursor {
            out.push(self.slots[p].node.id.clone());
            cursor = self.slots[p].parent;
        }
        out
    }

    /// True if `candidate` lies strictly below `id`
    pub fn is_descendant(&self, candidate: &str, id: &str) -> bool {
        self.ancestors(candidate).iter().any(|a| a == id)
    }

    /// Root-level nodes that declare no parent.
    ///
    /// The parent choices the admin form offers by default.
    pub fn top_level(&self) -> impl Iterator<Item = &MenuNode> {
        self.roots().filter(|n| n.parent_id.is_none())
    }

    /// Every node in depth-first pre-order
    pub fn iter(&self) -> impl Iterator<Item = &MenuNode> {
        self.preorder().into_iter().map(move |i| &self.slots[i].node)
    }

    /// Flatten the whole tree into `(node, depth)` rows in display order
    pub fn flatten(&self) -> Vec<TreeRow<'_>> {
        self.walk(|_| true)
    }

    /// Flatten the tree, descending into a node's children only when
    /// `descend` returns true for it.
    pub fn walk<F>(&self, mut descend: F) -> Vec<TreeRow<'_>>
    where
        F: FnMut(&MenuNode) -> bool,
    {
        let mut rows = Vec::with_capacity(self.slots.len());
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();

        while let Some(i) = stack.pop() {
            let slot = &self.slots[i];
            rows.push(TreeRow {
                node: &slot.node,
                depth: slot.depth,
                has_children: !slot.children.is_empty(),
            });

            if !slot.children.is_empty() && descend(&slot.node) {
                stack.extend(slot.children.iter().rev());
            }
        }

        rows
    }

    /// Ids of every node whose path equals `current_path` or that has a
    /// descendant whose path does: the active path(s) through the tree.
    pub fn active_set(&self, current_path: &str) -> HashSet<MenuId> {
        let order = self.preorder();
        let mut active = vec![false; self.slots.len()];

        // Reverse pre-order visits every child before its parent
        for &i in order.iter().rev() {
            let slot = &self.slots[i];
            active[i] =
                slot.node.path == current_path || slot.children.iter().any(|&c| active[c]);
        }

        order
            .into_iter()
            .filter(|&i| active[i])
            .map(|i| self.slots[i].node.id.clone())
            .collect()
    }

    /// True if the node's path equals `current_path`, or if any descendant's does
    pub fn is_active(&self, id: &str, current_path: &str) -> bool {
        let Some(&start) = self.index.get(id) else {
            return false;
        };

        let mut stack = vec![start];
        while let Some(i) = stack.pop() {
            let slot = &self.slots[i];
            if slot.node.path == current_path {
                return true;
            }
            stack.extend(slot.children.iter().copied());
        }
        false
    }

    fn preorder(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.slots.len());
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();
        while let Some(i) = stack.pop() {
            order.push(i);
            stack.extend(self.slots[i].children.iter().rev());
        }
        order
    }
}
