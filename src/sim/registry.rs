//! Depth-sorted actor registry
//!
//! Keeps actors back-to-front by depth so the update pass and the render
//! pass both visit background before foreground. Equal depths keep their
//! insertion order.

use serde::{Deserialize, Serialize};

/// Something with a render/update depth and a stable id
pub trait Layered {
    /// Lower is further back
    fn depth(&self) -> f32;
    fn id(&self) -> u32;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepthSortedRegistry<T> {
    items: Vec<T>,
}

impl<T> Default for DepthSortedRegistry<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Layered> DepthSortedRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stable insert: goes after every item of lower or equal depth
    pub fn insert(&mut self, item: T) {
        let depth = item.depth();
        let index = self
            .items
            .iter()
            .position(|existing| existing.depth() > depth)
            .unwrap_or(self.items.len());
        self.items.insert(index, item);
    }

    /// Remove by id
    pub fn remove(&mut self, id: u32) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Keep only items matching `keep`; order is preserved
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.items.retain(keep);
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Back-to-front traversal
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Back-to-front traversal
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Ordered slice, for passes that need pairwise mutable access.
    /// Items must not change depth through it.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<'a, T: Layered> IntoIterator for &'a DepthSortedRegistry<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
