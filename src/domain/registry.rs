//! Ordered registry of restaurant lists with a single optional selection.

use tracing::debug;

use crate::domain::entities::{Restaurant, RestaurantList};
use crate::domain::error::{DomainError, DomainResult};

/// Owns every `RestaurantList` and tracks which one is selected.
///
/// Insertion order drives display and index-based selection. The selection
/// is either `None` or a valid index; no operation leaves it dangling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRegistry {
    lists: Vec<RestaurantList>,
    selected: Option<usize>,
}

impl ListRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the registry with existing lists. Nothing is selected.
    pub fn with_lists(lists: Vec<RestaurantList>) -> Self {
        Self {
            lists,
            selected: None,
        }
    }

    pub fn lists(&self) -> &[RestaurantList] {
        &self.lists
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn get(&self, index: usize) -> DomainResult<&RestaurantList> {
        self.lists.get(index).ok_or(DomainError::IndexOutOfRange {
            index,
            len: self.lists.len(),
        })
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> DomainResult<&mut RestaurantList> {
        let len = self.lists.len();
        self.lists
            .get_mut(index)
            .ok_or(DomainError::IndexOutOfRange { index, len })
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_list(&self) -> Option<&RestaurantList> {
        self.selected.and_then(|i| self.lists.get(i))
    }

    /// Append a list and return its index. The selection is not changed.
    pub fn add_list(&mut self, list: RestaurantList) -> usize {
        debug!("add_list: name={}", list.name());
        self.lists.push(list);
        self.lists.len() - 1
    }

    /// Remove and return the list at `index`.
    ///
    /// Selection follows the same logical list: it is cleared when the
    /// selected list itself is removed and shifted down by one when an
    /// earlier list is removed.
    pub fn remove_at(&mut self, index: usize) -> DomainResult<RestaurantList> {
        if index >= self.lists.len() {
            return Err(DomainError::IndexOutOfRange {
                index,
                len: self.lists.len(),
            });
        }
        let removed = self.lists.remove(index);
        self.selected = match self.selected {
            Some(sel) if sel == index => None,
            Some(sel) if sel > index => Some(sel - 1),
            other => other,
        };
        debug!(
            "remove_at: index={}, name={}, selected={:?}",
            index,
            removed.name(),
            self.selected
        );
        Ok(removed)
    }

    /// Select the list at `index`, or clear the selection with `None`.
    pub fn select(&mut self, index: Option<usize>) -> DomainResult<()> {
        if let Some(i) = index {
            if i >= self.lists.len() {
                return Err(DomainError::IndexOutOfRange {
                    index: i,
                    len: self.lists.len(),
                });
            }
        }
        debug!("select: {:?} -> {:?}", self.selected, index);
        self.selected = index;
        Ok(())
    }

    /// Add a restaurant to the list at `index`.
    ///
    /// Returns `Ok(false)` if the list already holds a restaurant of that name.
    pub fn add_restaurant(&mut self, index: usize, restaurant: Restaurant) -> DomainResult<bool> {
        let list = self.get_mut(index)?;
        let added = list.add(restaurant);
        debug!("add_restaurant: list={}, added={}", list.name(), added);
        Ok(added)
    }
}
