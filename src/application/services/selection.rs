//! Selection controller
//!
//! Single entry point for mutating the list registry. Every mutation
//! recomputes the active view and pushes it to subscribers before returning.

use tracing::{debug, trace};

use crate::application::services::merge::{MergeOutcome, MergeService};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{DomainResult, ListRegistry, Restaurant, RestaurantList};

/// Selection state of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    NoSelection,
    HasSelection(usize),
}

/// Snapshot delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveView {
    pub state: SelectionState,
    /// Name of the selected list, if any
    pub list_name: Option<String>,
    /// Restaurants of the selected list, in order (empty without selection)
    pub restaurants: Vec<Restaurant>,
    /// Whether "add restaurant" and "merge" are currently allowed
    pub actions_enabled: bool,
}

/// Receives active view updates.
pub trait ViewListener {
    fn on_view_changed(&mut self, view: &ActiveView);
}

impl<F> ViewListener for F
where
    F: FnMut(&ActiveView),
{
    fn on_view_changed(&mut self, view: &ActiveView) {
        self(view)
    }
}

/// Handle returned by [`SelectionController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Mediates all registry changes and publishes the derived active view.
pub struct SelectionController {
    registry: ListRegistry,
    merger: MergeService,
    listeners: Vec<(SubscriptionId, Box<dyn ViewListener>)>,
    next_id: u64,
    published: ActiveView,
}

impl SelectionController {
    /// Take ownership of `registry`.
    pub fn new(registry: ListRegistry) -> Self {
        let published = derive_view(&registry);
        Self {
            registry,
            merger: MergeService::new(),
            listeners: Vec::new(),
            next_id: 0,
            published,
        }
    }

    /// Read-only access; mutations go through the controller.
    pub fn registry(&self) -> &ListRegistry {
        &self.registry
    }

    pub fn state(&self) -> SelectionState {
        self.published.state
    }

    /// True iff a list is selected and the registry holds at least two lists.
    pub fn actions_enabled(&self) -> bool {
        self.published.actions_enabled
    }

    pub fn active_view(&self) -> &ActiveView {
        &self.published
    }

    /// Register a listener. It receives the current view immediately.
    pub fn subscribe(&mut self, mut listener: impl ViewListener + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        listener.on_view_changed(&self.published);
        self.listeners.push((id, Box::new(listener)));
        debug!("subscribe: id={:?}, listeners={}", id, self.listeners.len());
        id
    }

    /// Remove a listener. Returns false for an unknown id.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        before != self.listeners.len()
    }

    /// Append a list. Selection is left alone; callers select it explicitly.
    pub fn add_list(&mut self, list: RestaurantList) -> usize {
        let index = self.registry.add_list(list);
        self.publish();
        index
    }

    pub fn remove_at(&mut self, index: usize) -> DomainResult<RestaurantList> {
        let removed = self.registry.remove_at(index)?;
        self.publish();
        Ok(removed)
    }

    pub fn select(&mut self, index: Option<usize>) -> DomainResult<()> {
        self.registry.select(index)?;
        self.publish();
        Ok(())
    }

    /// Add a restaurant to the selected list.
    ///
    /// `Ok(false)` reports a duplicate name; nothing changes in that case.
    pub fn add_restaurant(&mut self, restaurant: Restaurant) -> ApplicationResult<bool> {
        let target = self.enabled_target("add restaurant")?;
        let added = self.registry.add_restaurant(target, restaurant)?;
        self.publish();
        Ok(added)
    }

    /// Merge the list at `source` into the selected list.
    ///
    /// `source == None` is a declined merge and does nothing.
    pub fn merge_into_selected(
        &mut self,
        source: Option<usize>,
    ) -> ApplicationResult<Option<MergeOutcome>> {
        let target = self.enabled_target("merge")?;
        Ok(self.merge(target, source)?)
    }

    /// Merge the list at `source` into the list at `target`, regardless of
    /// the enabled signal.
    pub fn merge(
        &mut self,
        target: usize,
        source: Option<usize>,
    ) -> DomainResult<Option<MergeOutcome>> {
        let outcome = self.merger.merge(&mut self.registry, target, source)?;
        self.publish();
        Ok(outcome)
    }

    fn enabled_target(&self, action: &'static str) -> ApplicationResult<usize> {
        let SelectionState::HasSelection(index) = self.state() else {
            return Err(ApplicationError::NoSelection);
        };
        if !self.actions_enabled() {
            return Err(ApplicationError::ActionDisabled { action });
        }
        Ok(index)
    }

    fn publish(&mut self) {
        let view = derive_view(&self.registry);
        if view == self.published {
            trace!("publish: view unchanged");
            return;
        }
        debug!(
            "publish: state={:?}, list={:?}, restaurants={}, enabled={}",
            view.state,
            view.list_name,
            view.restaurants.len(),
            view.actions_enabled
        );
        self.published = view;
        for (_, listener) in self.listeners.iter_mut() {
            listener.on_view_changed(&self.published);
        }
    }
}

fn derive_view(registry: &ListRegistry) -> ActiveView {
    match (registry.selected_index(), registry.selected_list()) {
        (Some(index), Some(list)) => ActiveView {
            state: SelectionState::HasSelection(index),
            list_name: Some(list.name().to_string()),
            restaurants: list.restaurants().to_vec(),
            actions_enabled: registry.len() >= 2,
        },
        _ => ActiveView {
            state: SelectionState::NoSelection,
            list_name: None,
            restaurants: Vec::new(),
            actions_enabled: false,
        },
    }
}
