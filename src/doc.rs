//! Document model: placed emoji items, the optional background, and the store.
//!
//! This module defines the data placed on the canvas (`Item`, `Background`),
//! the mutation interface the gesture engine drives (`Document`), and an
//! in-memory implementation of it (`DocStore`). Persistence, undo, and image
//! fetching live outside this crate; a host that owns a real document
//! implements [`Document`] over it.
//!
//! Removals are reported twice: directly as the return value of
//! [`Document::remove_item`], and as queued notifications drained with
//! [`Document::take_removed`]. The engine drains the queue after every
//! mutation so the selection never outlives an item.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::{Point, Size, Vector};

/// Unique identifier for a placed item.
pub type ItemId = Uuid;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DocError {
    #[error("item not found: {0}")]
    NotFound(ItemId),
    #[error("invalid item size: {0} (must be positive and finite)")]
    InvalidSize(f64),
    #[error("invalid scale factor: {0} (must be positive and finite)")]
    InvalidScale(f64),
    #[error("item text is empty")]
    EmptyText,
}

/// An emoji glyph placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier for this item.
    pub id: ItemId,
    /// The glyph drawn for this item. Never changes after creation.
    pub text: String,
    /// Center of the glyph in document space (origin at canvas center).
    pub location: Point,
    /// Font-size-equivalent size in document units.
    pub size: f64,
}

/// The image drawn behind all items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    /// Where the image is fetched from.
    pub url: String,
    /// Decoded image size; absent while the fetch is pending or after it failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extent: Option<Size>,
}

/// Serializable copy of a whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// CRUD-style mutation interface consumed by the gesture engine.
pub trait Document {
    /// Place a new item and return its id.
    ///
    /// # Errors
    ///
    /// `InvalidSize` for a non-positive size, `EmptyText` for an empty glyph.
    fn add_item(&mut self, text: &str, at: Point, size: f64) -> Result<ItemId, DocError>;

    /// Remove an item, returning it.
    ///
    /// # Errors
    ///
    /// `NotFound` if no item has this id.
    fn remove_item(&mut self, id: &ItemId) -> Result<Item, DocError>;

    /// Move an item by a document-space delta.
    ///
    /// # Errors
    ///
    /// `NotFound` if no item has this id.
    fn move_item(&mut self, id: &ItemId, by: Vector) -> Result<Item, DocError>;

    /// Multiply an item's size by `factor`.
    ///
    /// # Errors
    ///
    /// `NotFound` if no item has this id, `InvalidScale` for a non-positive factor.
    fn scale_item(&mut self, id: &ItemId, factor: f64) -> Result<Item, DocError>;

    /// Replace the background with the image at `url`. Its extent is unknown until reported.
    fn set_background_reference(&mut self, url: &str);

    /// Report the decoded size of the current background image.
    fn set_background_extent(&mut self, extent: Option<Size>);

    fn background(&self) -> Option<&Background>;

    /// All items in draw order (first is drawn beneath the rest).
    fn items(&self) -> &[Item];

    fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items().iter().find(|item| item.id == *id)
    }

    /// Drain the ids of items removed since the last call.
    fn take_removed(&mut self) -> Vec<ItemId>;
}

fn valid_size(size: f64) -> bool {
    size > 0.0 && size.is_finite()
}

/// In-memory document.
#[derive(Debug, Default)]
pub struct DocStore {
    items: Vec<Item>,
    background: Option<Background>,
    removed: Vec<ItemId>,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all content with a snapshot.
    ///
    /// Items with a duplicate id or an invalid size are skipped. Every previous
    /// item that is not kept, skipped ones included, is queued as a removal.
    pub fn load_snapshot(&mut self, snapshot: Snapshot) {
        let previous: Vec<ItemId> = self.items.iter().map(|item| item.id).collect();

        self.items.clear();
        for item in snapshot.items {
            if !valid_size(item.size) || self.items.iter().any(|existing| existing.id == item.id) {
                tracing::warn!(id = %item.id, size = item.size, "doc: skipping invalid snapshot item");
                continue;
            }
            self.items.push(item);
        }

        let kept = &self.items;
        self.removed
            .extend(previous.into_iter().filter(|id| !kept.iter().any(|item| item.id == *id)));
        self.background = snapshot.background;
    }

    /// Copy the current content into a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot { background: self.background.clone(), items: self.items.clone() }
    }

    /// Serialize the document as JSON.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.snapshot())
    }

    /// Build a store from JSON produced by [`DocStore::to_json`].
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        let mut store = Self::new();
        store.load_snapshot(snapshot);
        Ok(store)
    }

    /// Number of items currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the store contains no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn item_mut(&mut self, id: &ItemId) -> Result<&mut Item, DocError> {
        self.items
            .iter_mut()
            .find(|item| item.id == *id)
            .ok_or(DocError::NotFound(*id))
    }
}

impl Document for DocStore {
    fn add_item(&mut self, text: &str, at: Point, size: f64) -> Result<ItemId, DocError> {
        if text.is_empty() {
            return Err(DocError::EmptyText);
        }
        if !valid_size(size) {
            return Err(DocError::InvalidSize(size));
        }
        let id = Uuid::new_v4();
        self.items.push(Item { id, text: text.to_owned(), location: at, size });
        Ok(id)
    }

    fn remove_item(&mut self, id: &ItemId) -> Result<Item, DocError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == *id)
            .ok_or(DocError::NotFound(*id))?;
        let item = self.items.remove(index);
        self.removed.push(item.id);
        Ok(item)
    }

    fn move_item(&mut self, id: &ItemId, by: Vector) -> Result<Item, DocError> {
        let item = self.item_mut(id)?;
        item.location = item.location + by;
        Ok(item.clone())
    }

    fn scale_item(&mut self, id: &ItemId, factor: f64) -> Result<Item, DocError> {
        if !valid_size(factor) {
            return Err(DocError::InvalidScale(factor));
        }
        let item = self.item_mut(id)?;
        let size = item.size * factor;
        if !valid_size(size) {
            return Err(DocError::InvalidScale(factor));
        }
        item.size = size;
        Ok(item.clone())
    }

    fn set_background_reference(&mut self, url: &str) {
        self.background = Some(Background { url: url.to_owned(), extent: None });
    }

    fn set_background_extent(&mut self, extent: Option<Size>) {
        if let Some(background) = self.background.as_mut() {
            background.extent = extent;
        }
    }

    fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    fn items(&self) -> &[Item] {
        &self.items
    }

    fn take_removed(&mut self) -> Vec<ItemId> {
        std::mem::take(&mut self.removed)
    }
}
