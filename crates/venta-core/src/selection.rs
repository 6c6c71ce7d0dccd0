//! # Selection State
//!
//! The in-progress configuration a customer is building for one device.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Detail view opens ──► SelectionState::new()                            │
//! │                              │                                          │
//! │  Tap option ─────────► select_option("Almacenamiento", 128GB)           │
//! │  Tap add-on ─────────► toggle_add_on(7, true)                           │
//! │                              │        (revision += 1 on every call)     │
//! │                              ▼                                          │
//! │                     pricing::quote(details, &selection)                 │
//! │                              │                                          │
//! │  Back / purchase done ─► dropped (never persisted)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No membership checks happen here: the presentation layer only offers
//! options that belong to the group it renders.

use std::collections::HashMap;

use crate::types::{CustomizationGroup, CustomizationOption};

/// One customer's choices for one device.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    /// Chosen option per customization group name.
    options: HashMap<String, CustomizationOption>,

    /// Inclusion flag per add-on id. Absent means not included.
    add_ons: HashMap<i64, bool>,

    /// Bumped on every mutating call.
    revision: u64,
}

impl SelectionState {
    /// Creates an empty selection: every group on its default, no add-ons.
    pub fn new() -> Self {
        Self::default()
    }

    /// Chooses `option` for the group named `group_name`, replacing any
    /// earlier choice.
    pub fn select_option(&mut self, group_name: impl Into<String>, option: CustomizationOption) {
        self.options.insert(group_name.into(), option);
        self.revision += 1;
    }

    /// Sets or clears an add-on. Setting the flag it already has is harmless.
    pub fn toggle_add_on(&mut self, add_on_id: i64, included: bool) {
        self.add_ons.insert(add_on_id, included);
        self.revision += 1;
    }

    /// The option a group falls back to when nothing was chosen.
    #[inline]
    pub fn default_option_for(group: &CustomizationGroup) -> &CustomizationOption {
        group.default_option()
    }

    /// The explicit choice for a group, if any.
    pub fn selected_option(&self, group_name: &str) -> Option<&CustomizationOption> {
        self.options.get(group_name)
    }

    /// The explicit choice for `group`, or its default.
    pub fn resolved_option<'a>(&'a self, group: &'a CustomizationGroup) -> &'a CustomizationOption {
        self.selected_option(group.name())
            .unwrap_or_else(|| Self::default_option_for(group))
    }

    /// Returns true if the add-on flag is set to included.
    pub fn is_included(&self, add_on_id: i64) -> bool {
        self.add_ons.get(&add_on_id).copied().unwrap_or(false)
    }

    /// Ids of every add-on currently flagged as included, in ascending order.
    pub fn included_add_on_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self
            .add_ons
            .iter()
            .filter(|(_, included)| **included)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Counter that changes whenever the selection is mutated.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Forgets every choice.
    pub fn clear(&mut self) {
        self.options.clear();
        self.add_ons.clear();
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn option(id: i64, cents: i64) -> CustomizationOption {
        CustomizationOption {
            id,
            name: format!("Option {}", id),
            additional_price: Money::from_cents(cents),
        }
    }

    fn storage_group() -> CustomizationGroup {
        CustomizationGroup::new(1, "Storage", vec![option(10, 0), option(11, 1000)]).unwrap()
    }

    #[test]
    fn test_select_option_overwrites() {
        let mut selection = SelectionState::new();
        selection.select_option("Storage", option(10, 0));
        selection.select_option("Storage", option(11, 1000));

        assert_eq!(selection.selected_option("Storage").map(|o| o.id), Some(11));
    }

    #[test]
    fn test_resolved_option_falls_back_to_default() {
        let group = storage_group();
        let mut selection = SelectionState::new();
        assert_eq!(selection.resolved_option(&group).id, 10);

        selection.select_option("Storage", option(11, 1000));
        assert_eq!(selection.resolved_option(&group).id, 11);
    }

    #[test]
    fn test_toggle_add_on_is_idempotent() {
        let mut selection = SelectionState::new();
        assert!(!selection.is_included(7));

        selection.toggle_add_on(7, true);
        selection.toggle_add_on(7, true);
        assert!(selection.is_included(7));
        assert_eq!(selection.included_add_on_ids(), vec![7]);

        selection.toggle_add_on(7, false);
        assert!(!selection.is_included(7));
        assert!(selection.included_add_on_ids().is_empty());
    }

    #[test]
    fn test_revision_tracks_mutations() {
        let mut selection = SelectionState::new();
        let start = selection.revision();

        selection.toggle_add_on(1, true);
        selection.select_option("Storage", option(10, 0));
        assert_eq!(selection.revision(), start + 2);

        selection.clear();
        assert_eq!(selection.revision(), start + 3);
        assert!(selection.selected_option("Storage").is_none());
    }
}
