//! [`Reservation`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, Date, DateTimeOf, PaymentMethod};
use derive_more::{Display, Error, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{estate, user};
#[cfg(doc)]
use crate::domain::{Estate, User};

/// Reservation of an [`Estate`] by a [`User`] for some [`Period`].
#[derive(Clone, Debug)]
pub struct Reservation {
    /// ID of this [`Reservation`].
    pub id: Id,

    /// ID of the [`User`] who made this [`Reservation`].
    pub user_id: user::Id,

    /// ID of the reserved [`Estate`].
    pub estate_id: estate::Id,

    /// [`Period`] the [`Estate`] is reserved for.
    pub period: Period,

    /// [`PaymentMethod`] chosen for this [`Reservation`].
    pub payment_method: PaymentMethod,

    /// [`DateTime`] when this [`Reservation`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Reservation`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Date range of a [`Reservation`].
///
/// The `start` [`Date`] is always strictly before the `end` one. The `end`
/// is the check-out day, so back-to-back [`Period`]s don't overlap.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[display("{start}..{end}")]
pub struct Period {
    /// Check-in [`Date`].
    start: Date,

    /// Check-out [`Date`].
    end: Date,
}

impl Period {
    /// Creates a new [`Period`] between the provided [`Date`]s.
    ///
    /// # Errors
    ///
    /// If `start` is not strictly before `end`.
    pub fn new(start: Date, end: Date) -> Result<Self, InvalidPeriodError> {
        if start >= end {
            return Err(InvalidPeriodError { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the check-in [`Date`] of this [`Period`].
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Returns the check-out [`Date`] of this [`Period`].
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Returns the number of nights in this [`Period`].
    #[must_use]
    pub fn nights(&self) -> i64 {
        self.start.days_until(self.end)
    }

    /// Checks whether this [`Period`] shares at least one night with the
    /// `other` one.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Error of creating a [`Period`] whose start is not before its end.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("`{start}` must be before `{end}`")]
pub struct InvalidPeriodError {
    /// Requested check-in [`Date`].
    pub start: Date,

    /// Requested check-out [`Date`].
    pub end: Date,
}

/// [`DateTime`] when a [`Reservation`] was created.
pub type CreationDateTime = DateTimeOf<(Reservation, unit::Creation)>;

#[cfg(test)]
mod spec {
    use common::Date;

    use super::Period;

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn period(start: &str, end: &str) -> Period {
        Period::new(date(start), date(end)).unwrap()
    }

    #[test]
    fn rejects_inverted_or_empty_period() {
        assert!(Period::new(date("2023-05-18"), date("2023-05-16")).is_err());
        assert!(Period::new(date("2023-05-16"), date("2023-05-16")).is_err());
        assert_eq!(period("2023-05-16", "2023-05-18").nights(), 2);
    }

    #[test]
    fn detects_overlaps() {
        let booked = period("2023-05-16", "2023-05-18");

        assert!(booked.overlaps(&period("2023-05-17", "2023-05-20")));
        assert!(booked.overlaps(&period("2023-05-10", "2023-05-30")));
        assert!(period("2023-05-10", "2023-05-17").overlaps(&booked));
    }

    #[test]
    fn back_to_back_periods_do_not_overlap() {
        let booked = period("2023-05-16", "2023-05-18");

        assert!(!booked.overlaps(&period("2023-05-18", "2023-05-20")));
        assert!(!booked.overlaps(&period("2023-05-14", "2023-05-16")));
    }
}
