//! In-Memory Menu Store
//!
//! Authoritative copy of the menu resource for the development backend and
//! the in-process gateway. Nodes are kept flat; [`MenuStore::list`] assembles
//! the nested shape the client renders, sorting siblings by `order` with ties
//! broken by arrival.

use std::collections::HashMap;
use thiserror::Error;

use crate::menu::types::{CreateMenuRequest, MenuId, MenuNode, UpdateMenuRequest};

/// Store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Menu item {0} not found")]
    NotFound(MenuId),

    #[error("Parent menu item {0} does not exist")]
    UnknownParent(MenuId),

    #[error("Menu item {id} cannot be placed under {parent}: cycle")]
    Cycle { id: MenuId, parent: MenuId },

    #[error("Menu item id {0} already exists")]
    DuplicateId(MenuId),

    #[error("{0}")]
    Validation(String),
}

#[derive(Debug, Clone)]
struct Entry {
    node: MenuNode,
    /// Arrival sequence, the tie-breaker among equal `order`
    seq: u64,
}

/// Flat, id-keyed menu storage
#[derive(Debug, Clone, Default)]
pub struct MenuStore {
    entries: HashMap<MenuId, Entry>,
    next_seq: u64,
    next_id: u64,
}

impl MenuStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with the demo navigation
    pub fn seeded_demo() -> Self {
        let mut store = Self::new();
        let demo = [
            ("Dashboard", "📊", "/dashboard", None, 0),
            ("Portfolio", "💼", "/portfolio", None, 1),
            ("Holdings", "📁", "/portfolio/holdings", Some("2"), 0),
            ("Transactions", "🔁", "/portfolio/transactions", Some("2"), 1),
            ("Market", "📈", "/market", None, 2),
            ("Watchlist", "👀", "/market/watchlist", Some("5"), 0),
            ("Admin", "⚙️", "/admin", None, 3),
            ("Menus", "🧭", "/admin/menus", Some("7"), 0),
        ];

        for (label, icon, path, parent, order) in demo {
            let request = CreateMenuRequest {
                label: label.to_string(),
                icon: icon.to_string(),
                path: path.to_string(),
                parent_id: parent.map(str::to_string),
                order,
                permissions: None,
            };
            if let Err(e) = store.create(&request) {
                tracing::warn!(error = %e, label, "Skipping demo menu item");
            }
        }
        store
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flat copy of a node (no children)
    pub fn get(&self, id: &str) -> Option<MenuNode> {
        self.entries.get(id).map(|e| e.node.clone())
    }

    /// Insert a node under its own id (children are ignored). Used to seed
    /// fixtures with known ids; numeric ids advance the id counter.
    pub fn insert(&mut self, mut node: MenuNode) {
        node.children.clear();
        if let Ok(n) = node.id.parse::<u64>() {
            self.next_id = self.next_id.max(n);
        }
        let seq = self.bump_seq();
        self.entries.insert(node.id.clone(), Entry { node, seq });
    }

    /// Root nodes with nested, sorted children
    pub fn list(&self) -> Vec<MenuNode> {
        let mut groups: HashMap<Option<&str>, Vec<&Entry>> = HashMap::new();
        for entry in self.entries.values() {
            let parent = entry
                .node
                .parent_id
                .as_deref()
                .filter(|p| self.entries.contains_key(*p));
            groups.entry(parent).or_default().push(entry);
        }
        for siblings in groups.values_mut() {
            siblings.sort_by_key(|e| (e.node.order, e.seq));
        }

        // Pre-order ids, then build bottom-up so no recursion is needed
        let mut preorder: Vec<&str> = Vec::with_capacity(self.entries.len());
        let mut stack: Vec<&str> = groups
            .get(&None)
            .map(|roots| roots.iter().rev().map(|e| e.node.id.as_str()).collect())
            .unwrap_or_default();
        while let Some(id) = stack.pop() {
            preorder.push(id);
            if let Some(children) = groups.get(&Some(id)) {
                stack.extend(children.iter().rev().map(|e| e.node.id.as_str()));
            }
        }

        let mut built: HashMap<&str, MenuNode> = HashMap::with_capacity(preorder.len());
        for &id in preorder.iter().rev() {
            let mut node = self.entries[id].node.clone();
            if let Some(children) = groups.get(&Some(id)) {
                node.children = children
                    .iter()
                    .filter_map(|e| built.remove(e.node.id.as_str()))
                    .collect();
            }
            built.insert(id, node);
        }

        groups
            .get(&None)
            .map(|roots| {
                roots
                    .iter()
                    .filter_map(|e| built.remove(e.node.id.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Create a node; the store assigns its id
    pub fn create(&mut self, request: &CreateMenuRequest) -> Result<MenuNode, StoreError> {
        validate_fields(&request.label, &request.icon, &request.path)?;
        if let Some(parent) = &request.parent_id {
            if !self.entries.contains_key(parent) {
                return Err(StoreError::UnknownParent(parent.clone()));
            }
        }

        self.next_id += 1;
        let id = self.next_id.to_string();
        if self.entries.contains_key(&id) {
            return Err(StoreError::DuplicateId(id));
        }

        let node = MenuNode {
            id: id.clone(),
            label: request.label.trim().to_string(),
            icon: request.icon.clone(),
            path: request.path.trim().to_string(),
            parent_id: request.parent_id.clone(),
            order: request.order,
            is_active: true,
            permissions: request.permissions.clone(),
            children: Vec::new(),
        };

        let seq = self.bump_seq();
        self.entries.insert(id, Entry { node: node.clone(), seq });
        Ok(node)
    }

    /// Apply a partial update; absent fields are left untouched
    pub fn update(&mut self, id: &str, request: &UpdateMenuRequest) -> Result<MenuNode, StoreError> {
        let current = self
            .entries
            .get(id)
            .map(|e| e.node.clone())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Some(Some(parent)) = &request.parent_id {
            if !self.entries.contains_key(parent) {
                return Err(StoreError::UnknownParent(parent.clone()));
            }
            if parent == id || self.is_below(id, parent) {
                return Err(StoreError::Cycle {
                    id: id.to_string(),
                    parent: parent.clone(),
                });
            }
        }

        let mut node = current;
        if let Some(label) = &request.label {
            node.label = label.trim().to_string();
        }
        if let Some(icon) = &request.icon {
            node.icon = icon.clone();
        }
        if let Some(path) = &request.path {
            node.path = path.trim().to_string();
        }
        if let Some(parent) = &request.parent_id {
            node.parent_id = parent.clone();
        }
        if let Some(order) = request.order {
            node.order = order;
        }
        if let Some(active) = request.is_active {
            node.is_active = active;
        }
        if let Some(permissions) = &request.permissions {
            node.permissions = Some(permissions.clone());
        }
        validate_fields(&node.label, &node.icon, &node.path)?;

        if let Some(entry) = self.entries.get_mut(id) {
            entry.node = node.clone();
        }
        Ok(node)
    }

    /// Delete a node together with its whole subtree
    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        if !self.entries.contains_key(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }

        let mut doomed = vec![id.to_string()];
        let mut cursor = 0;
        while cursor < doomed.len() {
            let current = doomed[cursor].clone();
            doomed.extend(
                self.entries
                    .values()
                    .filter(|e| e.node.parent_id.as_deref() == Some(current.as_str()))
                    .map(|e| e.node.id.clone()),
            );
            cursor += 1;
        }

        for doomed_id in &doomed {
            self.entries.remove(doomed_id);
        }
        tracing::debug!(menu_id = %id, removed = doomed.len(), "Deleted menu subtree");
        Ok(())
    }

    /// True if `candidate` lies somewhere below `id`
    fn is_below(&self, id: &str, candidate: &str) -> bool {
        let mut cursor = self.entries.get(candidate).and_then(|e| e.node.parent_id.clone());
        let mut hops = 0;
        while let Some(parent) = cursor {
            if parent == id {
                return true;
            }
            hops += 1;
            if hops > self.entries.len() {
                break;
            }
            cursor = self.entries.get(&parent).and_then(|e| e.node.parent_id.clone());
        }
        false
    }

    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}

fn validate_fields(label: &str, icon: &str, path: &str) -> Result<(), StoreError> {
    if label.trim().is_empty() {
        return Err(StoreError::Validation("Label cannot be empty".to_string()));
    }
    if icon.trim().is_empty() {
        return Err(StoreError::Validation("Icon cannot be empty".to_string()));
    }
    if !path.trim().starts_with('/') {
        return Err(StoreError::Validation("Path must start with '/'".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(label: &str, path: &str, parent: Option<&str>, order: i32) -> CreateMenuRequest {
        CreateMenuRequest {
            label: label.to_string(),
            icon: "•".to_string(),
            path: path.to_string(),
            parent_id: parent.map(str::to_string),
            order,
            permissions: None,
        }
    }

    fn labels(nodes: &[MenuNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.label.as_str()).collect()
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut store = MenuStore::new();
        let a = store.create(&request("A", "/a", None, 0)).unwrap();
        let b = store.create(&request("B", "/b", Some(&a.id), 0)).unwrap();

        assert_eq!(a.id, "1");
        assert_eq!(b.id, "2");
        assert_eq!(b.parent_id.as_deref(), Some("1"));
        assert!(b.is_active);
    }

    #[test]
    fn test_list_sorts_by_order_then_arrival() {
        let mut store = MenuStore::new();
        store.create(&request("Late", "/late", None, 5)).unwrap();
        store.create(&request("First", "/first", None, 0)).unwrap();
        store.create(&request("Tie", "/tie", None, 5)).unwrap();
        store.create(&request("Child B", "/b", Some("2"), 1)).unwrap();
        store.create(&request("Child A", "/a", Some("2"), 0)).unwrap();

        let roots = store.list();
        assert_eq!(labels(&roots), vec!["First", "Late", "Tie"]);
        assert_eq!(labels(&roots[0].children), vec!["Child A", "Child B"]);
        assert!(roots[1].children.is_empty());
    }

    #[test]
    fn test_create_rejects_unknown_parent_and_bad_fields() {
        let mut store = MenuStore::new();
        assert_eq!(
            store.create(&request("A", "/a", Some("99"), 0)).unwrap_err(),
            StoreError::UnknownParent("99".to_string())
        );
        assert!(matches!(
            store.create(&request("", "/a", None, 0)),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            store.create(&request("A", "a", None, 0)),
            Err(StoreError::Validation(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_partial_and_move_to_root() {
        let mut store = MenuStore::new();
        store.create(&request("Parent", "/p", None, 0)).unwrap();
        store.create(&request("Child", "/c", Some("1"), 0)).unwrap();

        let updated = store
            .update(
                "2",
                &UpdateMenuRequest {
                    order: Some(4),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.order, 4);
        assert_eq!(updated.parent_id.as_deref(), Some("1"));

        let moved = store
            .update(
                "2",
                &UpdateMenuRequest {
                    parent_id: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(moved.parent_id.is_none());
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn test_update_rejects_cycles() {
        let mut store = MenuStore::new();
        store.create(&request("A", "/a", None, 0)).unwrap();
        store.create(&request("B", "/b", Some("1"), 0)).unwrap();
        store.create(&request("C", "/c", Some("2"), 0)).unwrap();

        let to = |parent: &str| UpdateMenuRequest {
            parent_id: Some(Some(parent.to_string())),
            ..Default::default()
        };

        assert!(matches!(store.update("1", &to("3")), Err(StoreError::Cycle { .. })));
        assert!(matches!(store.update("1", &to("1")), Err(StoreError::Cycle { .. })));
        assert_eq!(
            store.update("9", &to("1")).unwrap_err(),
            StoreError::NotFound("9".to_string())
        );
        assert!(store.update("3", &to("1")).is_ok());
    }

    #[test]
    fn test_delete_removes_subtree() {
        let mut store = MenuStore::seeded_demo();
        let before = store.len();

        store.delete("2").unwrap();
        assert_eq!(store.len(), before - 3);
        assert!(store.get("3").is_none());
        assert!(store.get("4").is_none());
        assert_eq!(
            store.delete("2").unwrap_err(),
            StoreError::NotFound("2".to_string())
        );
    }

    #[test]
    fn test_insert_keeps_ids_and_advances_counter() {
        let mut store = MenuStore::new();
        store.insert(MenuNode::new("42", "Reports", "📈", "/reports"));
        let next = store.create(&request("Next", "/next", None, 0)).unwrap();
        assert_eq!(next.id, "43");
        assert_eq!(store.get("42").unwrap().label, "Reports");
    }

    #[test]
    fn test_seeded_demo_shape() {
        let roots = MenuStore::seeded_demo().list();
        assert_eq!(labels(&roots), vec!["Dashboard", "Portfolio", "Market", "Admin"]);
        assert_eq!(labels(&roots[1].children), vec!["Holdings", "Transactions"]);
        assert_eq!(roots[3].children[0].path, "/admin/menus");
    }
}
