use std::collections::BTreeSet;

use crate::data::filter::SpeciesFilter;
use crate::data::model::{Attribute, Species};

// ---------------------------------------------------------------------------
// Input identifiers and values
// ---------------------------------------------------------------------------

/// The controls a render function can depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InputId {
    SelectedAttribute,
    BinCount,
    SelectedSpecies,
}

/// Histogram bin count, always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BinCount(u32);

impl BinCount {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 10;

    /// Clamp an arbitrary value into the allowed range.
    pub fn new(n: u32) -> Self {
        BinCount(n.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for BinCount {
    fn default() -> Self {
        BinCount(Self::MIN)
    }
}

/// A user interaction with one of the sidebar controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    SelectAttribute(Attribute),
    SetBinCount(u32),
    SetSpeciesSelected(Species, bool),
    SetSpecies(SpeciesFilter),
}

impl InputEvent {
    pub fn target(&self) -> InputId {
        match self {
            InputEvent::SelectAttribute(_) => InputId::SelectedAttribute,
            InputEvent::SetBinCount(_) => InputId::BinCount,
            InputEvent::SetSpeciesSelected(..) | InputEvent::SetSpecies(_) => {
                InputId::SelectedSpecies
            }
        }
    }
}

// ---------------------------------------------------------------------------
// InputState
// ---------------------------------------------------------------------------

/// Current value of every control. Only [`InputState::apply`] mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputState {
    selected_attribute: Attribute,
    bin_count: BinCount,
    selected_species: SpeciesFilter,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            selected_attribute: Attribute::BillLength,
            bin_count: BinCount::default(),
            selected_species: BTreeSet::from([Species::Adelie]),
        }
    }
}

impl InputState {
    pub fn selected_attribute(&self) -> Attribute {
        self.selected_attribute
    }

    pub fn bin_count(&self) -> BinCount {
        self.bin_count
    }

    pub fn selected_species(&self) -> &SpeciesFilter {
        &self.selected_species
    }

    /// Apply an event. Returns the input that changed, or `None` when the
    /// event left the value as it was.
    pub fn apply(&mut self, event: InputEvent) -> Option<InputId> {
        let target = event.target();
        let changed = match event {
            InputEvent::SelectAttribute(attr) => {
                let changed = self.selected_attribute != attr;
                self.selected_attribute = attr;
                changed
            }
            InputEvent::SetBinCount(n) => {
                let next = BinCount::new(n);
                let changed = self.bin_count != next;
                self.bin_count = next;
                changed
            }
            InputEvent::SetSpeciesSelected(species, true) => self.selected_species.insert(species),
            InputEvent::SetSpeciesSelected(species, false) => {
                self.selected_species.remove(&species)
            }
            InputEvent::SetSpecies(species) => {
                let changed = self.selected_species != species;
                self.selected_species = species;
                changed
            }
        };
        changed.then_some(target)
    }
}
