use crate::error::{LedgerError, Result};

/// Identity used for search and removal in an [`OrderedList`].
///
/// Two elements with equal ids are the same element, whatever else differs.
pub trait Identified {
    type Id: PartialEq;

    fn id(&self) -> Self::Id;
}

/// Insertion-ordered sequence with id-based lookup.
///
/// Lookup and removal by id are linear scans; positional access is O(1).
/// Out-of-range access returns `None` or an error, never panics.
#[derive(Debug, Clone)]
pub struct OrderedList<T> {
    items: Vec<T>,
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedList<T> {
    pub fn new() -> OrderedList<T> {
        OrderedList { items: Vec::new() }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        if index >= self.items.len() {
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
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

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: Identified> OrderedList<T> {
    pub fn index_of(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|item| item.id() == *id)
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.index_of(id).is_some()
    }

    /// Removes the first element with this id; a missing id is a no-op
    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let index = self.index_of(id)?;
        Some(self.items.remove(index))
    }
}

impl<'a, T> IntoIterator for &'a OrderedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
