//! # Filter Module
//!
//! Strength filter: the set of strength tiers currently shown.
//!
//! The selection can never become empty; toggling off the last selected
//! tier is refused.

use crate::detail::WiFiDetail;
use crate::error::Result;
use crate::settings::SettingsStore;
use crate::strength::{Strength, StrengthColor};
use std::collections::BTreeSet;

/// Toggle set over strength tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrengthFilter {
    selections: BTreeSet<Strength>,
    defaults: Vec<Strength>,
}

impl Default for StrengthFilter {
    fn default() -> Self {
        Self::new(Strength::ALL)
    }
}

impl StrengthFilter {
    /// Create a filter with the given initial selection.
    ///
    /// An empty selection starts from the defaults instead.
    #[must_use]
    pub fn new(selections: impl IntoIterator<Item = Strength>) -> Self {
        let mut selections: BTreeSet<Strength> = selections.into_iter().collect();
        if selections.is_empty() {
            selections.extend(Strength::ALL);
        }
        Self {
            selections,
            defaults: Strength::ALL.to_vec(),
        }
    }

    /// Currently selected tiers, ascending.
    #[must_use]
    pub fn selections(&self) -> &BTreeSet<Strength> {
        &self.selections
    }

    /// Every tier, ascending.
    #[must_use]
    pub fn defaults(&self) -> &[Strength] {
        &self.defaults
    }

    /// True when the selection differs from the defaults.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.selections.len() != self.defaults.len()
    }

    #[must_use]
    pub fn contains(&self, value: Strength) -> bool {
        self.selections.contains(&value)
    }

    /// Flip one tier in or out of the selection.
    ///
    /// Returns `true` if the selection changed. The last selected tier is
    /// never removed.
    pub fn toggle(&mut self, value: Strength) -> bool {
        let size = self.selections.len();
        if self.selections.contains(&value) {
            if size > 1 {
                self.selections.remove(&value);
            }
        } else {
            self.selections.insert(value);
        }
        size != self.selections.len()
    }

    /// Restore the default selection.
    pub fn reset(&mut self) {
        self.selections = self.defaults.iter().copied().collect();
    }

    /// Tier color when selected, [`StrengthColor::DEFAULT`] otherwise.
    #[must_use]
    pub fn color(&self, value: Strength) -> StrengthColor {
        if self.contains(value) {
            value.color()
        } else {
            StrengthColor::DEFAULT
        }
    }

    #[must_use]
    pub fn matches(&self, detail: &WiFiDetail) -> bool {
        self.contains(detail.signal.strength())
    }

    /// Keep only details whose strength is selected.
    pub fn apply<'a>(&self, details: impl IntoIterator<Item = &'a WiFiDetail>) -> Vec<&'a WiFiDetail> {
        details
            .into_iter()
            .filter(|detail| self.matches(detail))
            .collect()
    }

    /// Persist the current selection.
    pub fn save(&self, store: &mut impl SettingsStore) -> Result<()> {
        store.save_strengths(&self.selections)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::detail::{WiFiAdditional, WiFiIdentifier, WiFiSecurity};
    use crate::settings::MemorySettingsStore;
    use crate::signal::WiFiSignal;
    use crate::width::WiFiWidth;

    fn fixture() -> StrengthFilter {
        StrengthFilter::new(Strength::ALL)
    }

    #[test]
    fn inactive_by_default() {
        assert!(!fixture().is_active());
    }

    #[test]
    fn active_after_change() {
        let mut filter = fixture();
        filter.toggle(Strength::Two);
        assert!(filter.is_active());
    }

    #[test]
    fn selections_contain_every_tier() {
        let filter = fixture();
        assert!(Strength::ALL.iter().all(|s| filter.selections().contains(s)));
    }

    #[test]
    fn defaults_are_every_tier_in_order() {
        assert_eq!(fixture().defaults(), &Strength::ALL);
    }

    #[test]
    fn toggle_removes() {
        let mut filter = fixture();
        assert!(filter.toggle(Strength::Two));
        assert!(!filter.contains(Strength::Two));
    }

    #[test]
    fn toggle_adds() {
        let mut filter = fixture();
        filter.toggle(Strength::Three);
        assert!(filter.toggle(Strength::Three));
        assert!(filter.contains(Strength::Three));
    }

    #[test]
    fn removing_all_keeps_last() {
        let mut filter = fixture();
        for value in Strength::ALL {
            filter.toggle(value);
        }

        let (last, rest) = Strength::ALL.split_last().unwrap();
        assert!(rest.iter().all(|s| !filter.contains(*s)));
        assert!(filter.contains(*last));
        assert!(!filter.toggle(*last));
    }

    #[test]
    fn color_of_selected_tier() {
        assert_eq!(fixture().color(Strength::Two), Strength::Two.color());
    }

    #[test]
    fn color_of_deselected_tier() {
        let mut filter = fixture();
        filter.toggle(Strength::Two);
        assert_eq!(filter.color(Strength::Two), StrengthColor::DEFAULT);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut filter = fixture();
        filter.toggle(Strength::Zero);
        filter.toggle(Strength::One);
        filter.reset();
        assert!(!filter.is_active());
    }

    #[test]
    fn empty_selection_starts_from_defaults() {
        let filter = StrengthFilter::new(Vec::<Strength>::new());
        assert!(!filter.is_active());
    }

    #[test]
    fn apply_keeps_selected_strengths() {
        let strong = WiFiDetail::new(
            WiFiIdentifier::new("strong", "1"),
            WiFiSecurity::EMPTY,
            WiFiSignal::new(2437, 2437, WiFiWidth::Mhz20, -40),
            WiFiAdditional::EMPTY,
        );
        let weak = WiFiDetail::new(
            WiFiIdentifier::new("weak", "2"),
            WiFiSecurity::EMPTY,
            WiFiSignal::new(2437, 2437, WiFiWidth::Mhz20, -95),
            WiFiAdditional::EMPTY,
        );
        let mut filter = fixture();
        filter.toggle(Strength::Zero);

        let kept = filter.apply([&strong, &weak]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].ssid(), "strong");
    }

    #[test]
    fn save_persists_selections() {
        let mut store = MemorySettingsStore::default();
        let mut filter = fixture();
        filter.toggle(Strength::Four);

        filter.save(&mut store).unwrap();

        let saved = store.load().unwrap();
        assert_eq!(&saved.strengths, filter.selections());
    }
}
