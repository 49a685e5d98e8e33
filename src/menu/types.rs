//! Menu Data Types
//!
//! Wire shapes of the `/api/menus` resource. Field names follow the
//! backend's camelCase JSON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identifier of a menu node, assigned by the server
pub type MenuId = String;

/// One entry of the navigable menu tree, root or nested child
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuNode {
    pub id: MenuId,
    pub label: String,
    /// Glyph shown next to the label (usually an emoji)
    pub icon: String,
    /// In-app route this entry points at
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<MenuId>,
    /// Sort key among siblings
    #[serde(default)]
    pub order: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<BTreeSet<String>>,
    /// Children in server order (by `order`, ties by arrival)
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_empty"
    )]
    pub children: Vec<MenuNode>,
}

fn default_active() -> bool {
    true
}

/// Leaves may carry `"children": null`
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<MenuNode>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<Vec<MenuNode>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl MenuNode {
    /// Create a leaf node with default order and no parent
    pub fn new(
        id: impl Into<MenuId>,
        label: impl Into<String>,
        icon: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: icon.into(),
            path: path.into(),
            parent_id: None,
            order: 0,
            is_active: true,
            permissions: None,
            children: Vec::new(),
        }
    }

    /// Builder: set sort order
    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Builder: append a child, wiring its `parent_id` to this node
    pub fn child(mut self, mut child: MenuNode) -> Self {
        child.parent_id = Some(self.id.clone());
        self.children.push(child);
        self
    }

    /// Builder: set the parent reference
    pub fn parent(mut self, parent_id: impl Into<MenuId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Payload of `POST /api/menus`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuRequest {
    pub label: String,
    pub icon: String,
    pub path: String,
    /// Serialized as `null` for root entries
    #[serde(default)]
    pub parent_id: Option<MenuId>,
    #[serde(default)]
    pub order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<BTreeSet<String>>,
}

/// Payload of `PUT /api/menus/{id}`
///
/// Every field is optional: absent fields are left untouched by the server.
/// `parent_id` distinguishes "absent" (`None`) from "move to root"
/// (`Some(None)`, sent as an explicit `null`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "double_option"
    )]
    pub parent_id: Option<Option<MenuId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<BTreeSet<String>>,
}

impl UpdateMenuRequest {
    /// True when the request carries no field at all
    pub fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.icon.is_none()
            && self.path.is_none()
            && self.parent_id.is_none()
            && self.order.is_none()
            && self.is_active.is_none()
            && self.permissions.is_none()
    }
}

/// Present-but-null vs. absent for `Option<Option<T>>` fields.
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
