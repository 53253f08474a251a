//! Menu Models
//!
//! Data structures matching the remote store's record shape.

use serde::{Deserialize, Serialize};

/// A menu item as held in the in-memory mirror.
///
/// `id` is the store-assigned record key; the client never fabricates one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// The id-less record shape sent on create and update.
///
/// This is exactly what the store keeps under each key; the id lives in the
/// record's path, not in its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemDraft {
    pub name: String,
    pub price: f64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl MenuItem {
    /// Rebuild a mirrored item from its store key and record.
    pub fn from_record(id: String, record: MenuItemDraft) -> Self {
        Self {
            id,
            name: record.name,
            price: record.price,
            category: record.category,
            description: record.description,
            image: record.image,
        }
    }

}

/// A category with the items that belong to it. Derived, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuCategory {
    pub name: String,
    pub items: Vec<MenuItem>,
}
