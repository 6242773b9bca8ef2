//! City filter over the listed [`Estate`]s.

use crate::model::Estate;

/// Listed [`Estate`]s along with the currently selected subset of them.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    /// All the listed [`Estate`]s in their source order.
    estates: Vec<Estate>,

    /// Indices of the selected [`Estate`]s.
    selected: Vec<usize>,
}

impl Catalog {
    /// Creates a new [`Catalog`] of the provided [`Estate`]s with nothing
    /// selected.
    #[must_use]
    pub fn new(estates: Vec<Estate>) -> Self {
        Self {
            estates,
            selected: Vec::new(),
        }
    }

    /// Returns all the listed [`Estate`]s.
    #[must_use]
    pub fn estates(&self) -> &[Estate] {
        &self.estates
    }

    /// Selects the [`Estate`]s located exactly in the provided `city`.
    ///
    /// Source order is preserved. The selection is empty if no [`Estate`]
    /// matches.
    pub fn filter_by_city(&mut self, city: &str) {
        self.selected = self
            .estates
            .iter()
            .enumerate()
            .filter(|(_, e)| e.city == city)
            .map(|(i, _)| i)
            .collect();
    }

    /// Clears the selection.
    pub fn reset(&mut self) {
        self.selected.clear();
    }

    /// Returns the selected [`Estate`]s.
    pub fn selection(&self) -> impl Iterator<Item = &Estate> + '_ {
        self.selected.iter().map(|&i| &self.estates[i])
    }
}
