//! Participant membership changes between an event and an edit form.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::ProfileId;

/// Minimal change turning one participant set into another.
///
/// `to_add` and `to_remove` never overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MembershipDelta {
    pub to_add: BTreeSet<ProfileId>,
    pub to_remove: BTreeSet<ProfileId>,
}

impl MembershipDelta {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    /// Apply the delta to `original`.
    pub fn apply(&self, original: &BTreeSet<ProfileId>) -> BTreeSet<ProfileId> {
        original
            .difference(&self.to_remove)
            .chain(self.to_add.iter())
            .cloned()
            .collect()
    }
}

/// Compute what to add and remove so `original` becomes `selected`.
pub fn reconcile(original: &BTreeSet<ProfileId>, selected: &BTreeSet<ProfileId>) -> MembershipDelta {
    MembershipDelta {
        to_add: selected.difference(original).cloned().collect(),
        to_remove: original.difference(selected).cloned().collect(),
    }
}

/// Participants picked in a form, in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    picked: Vec<ProfileId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id` if absent, deselect it if present.
    pub fn toggle(&mut self, id: ProfileId) {
        if let Some(pos) = self.picked.iter().position(|p| *p == id) {
            self.picked.remove(pos);
        } else {
            self.picked.push(id);
        }
    }

    pub fn contains(&self, id: &ProfileId) -> bool {
        self.picked.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.picked.is_empty()
    }

    pub fn len(&self) -> usize {
        self.picked.len()
    }

    pub fn picked(&self) -> &[ProfileId] {
        &self.picked
    }

    pub fn ids(&self) -> BTreeSet<ProfileId> {
        self.picked.iter().cloned().collect()
    }
}

impl FromIterator<ProfileId> for Selection {
    fn from_iter<I: IntoIterator<Item = ProfileId>>(iter: I) -> Self {
        let mut selection = Selection::new();
        for id in iter {
            if !selection.contains(&id) {
                selection.picked.push(id);
            }
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> BTreeSet<ProfileId> {
        names.iter().map(|n| ProfileId::from(*n)).collect()
    }

    /// Every subset of a four-element universe.
    fn subsets() -> Vec<BTreeSet<ProfileId>> {
        let universe = ["p1", "p2", "p3", "p4"];
        (0u8..16)
            .map(|mask| {
                universe
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, n)| ProfileId::from(*n))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn swaps_one_participant() {
        let delta = reconcile(&ids(&["p1", "p2"]), &ids(&["p2", "p3"]));
        assert_eq!(delta.to_add, ids(&["p3"]));
        assert_eq!(delta.to_remove, ids(&["p1"]));
    }

    #[test]
    fn empty_original_adds_everything() {
        let delta = reconcile(&ids(&[]), &ids(&["p1"]));
        assert_eq!(delta.to_add, ids(&["p1"]));
        assert!(delta.to_remove.is_empty());
    }

    #[test]
    fn empty_selection_removes_everything() {
        let delta = reconcile(&ids(&["p1", "p2"]), &ids(&[]));
        assert!(delta.to_add.is_empty());
        assert_eq!(delta.to_remove, ids(&["p1", "p2"]));
    }

    #[test]
    fn equal_sets_produce_no_change() {
        let delta = reconcile(&ids(&["p1", "p2"]), &ids(&["p2", "p1"]));
        assert!(delta.is_empty());
    }

    #[test]
    fn delta_is_disjoint_and_reaches_selection() {
        for original in subsets() {
            for selected in subsets() {
                let delta = reconcile(&original, &selected);
                assert!(delta.to_add.is_disjoint(&delta.to_remove));
                assert_eq!(delta.apply(&original), selected);
            }
        }
    }

    #[test]
    fn toggle_selects_then_deselects() {
        let mut selection = Selection::new();
        selection.toggle("p1".into());
        selection.toggle("p2".into());
        assert_eq!(selection.picked(), &[ProfileId::from("p1"), ProfileId::from("p2")]);

        selection.toggle("p1".into());
        assert_eq!(selection.picked(), &[ProfileId::from("p2")]);
        assert!(!selection.contains(&"p1".into()));
    }

    #[test]
    fn selection_from_iter_drops_duplicates() {
        let selection: Selection = ["p1", "p2", "p1"].into_iter().map(ProfileId::from).collect();
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.ids(), ids(&["p1", "p2"]));
    }
}
