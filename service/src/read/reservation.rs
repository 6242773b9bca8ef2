//! [`Reservation`]-related read definitions.

#[cfg(doc)]
use crate::domain::Estate;
use crate::domain::{estate, reservation, Reservation};

/// Selector of [`Reservation`]s of an [`Estate`] sharing at least one night
/// with a [`reservation::Period`].
#[derive(Clone, Copy, Debug)]
pub struct Overlapping {
    /// ID of the reserved [`Estate`].
    pub estate_id: estate::Id,

    /// [`reservation::Period`] to check against.
    pub period: reservation::Period,
}

impl Overlapping {
    /// Checks whether the provided [`Reservation`] is selected by this
    /// [`Overlapping`] selector.
    #[must_use]
    pub fn matches(&self, reservation: &Reservation) -> bool {
        reservation.estate_id == self.estate_id
            && reservation.period.overlaps(&self.period)
    }
}
