//! [`Estate`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, Coordinates, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Property listed for rent.
#[derive(Clone, Debug)]
pub struct Estate {
    /// ID of this [`Estate`].
    pub id: Id,

    /// [`Name`] of this [`Estate`].
    pub name: Name,

    /// [`City`] this [`Estate`] is located in.
    pub city: City,

    /// Monthly [`Price`] of this [`Estate`].
    pub price: Price,

    /// [`Rating`] of this [`Estate`], if it has been rated.
    pub rating: Option<Rating>,

    /// Geographic location of this [`Estate`].
    pub location: Coordinates,

    /// [`Photos`] of this [`Estate`].
    pub photos: Photos,

    /// [`Characteristics`] of this [`Estate`].
    pub characteristics: Characteristics,

    /// [`Lifestyle`] rules of this [`Estate`].
    pub lifestyle: Lifestyle,

    /// [`DateTime`] when this [`Estate`] was created.
    pub created_at: CreationDateTime,
}

/// ID of an [`Estate`].
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

/// Name of an [`Estate`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// City an [`Estate`] is located in.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct City(String);

impl City {
    /// Creates a new [`City`] if the given `city` is valid.
    #[must_use]
    pub fn new(city: impl Into<String>) -> Option<Self> {
        let city = city.into();
        Self::check(&city).then_some(Self(city))
    }

    /// Checks whether the given `city` is a valid [`City`].
    fn check(city: impl AsRef<str>) -> bool {
        let city = city.as_ref();
        city.trim() == city && !city.is_empty() && city.len() <= 512
    }
}

impl FromStr for City {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `City`")
    }
}

/// Non-negative monthly price of an [`Estate`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub struct Price(Money);

impl Price {
    /// Creates a new [`Price`] if the given `money` is not negative.
    #[must_use]
    pub fn new(money: Money) -> Option<Self> {
        (money.amount >= Decimal::ZERO).then_some(Self(money))
    }

    /// Returns [`Money`] of this [`Price`].
    #[must_use]
    pub const fn money(&self) -> Money {
        self.0
    }
}

/// Rating of an [`Estate`] from `1` to `10`.
#[derive(Clone, Copy, Debug, Display, Eq, Ord, PartialEq, PartialOrd)]
pub struct Rating(u8);

impl Rating {
    /// Lowest possible [`Rating`].
    pub const MIN: u8 = 1;

    /// Highest possible [`Rating`].
    pub const MAX: u8 = 10;

    /// Creates a new [`Rating`] if the given `rating` is in range.
    #[must_use]
    pub fn new(rating: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&rating).then_some(Self(rating))
    }

    /// Returns the numeric value of this [`Rating`].
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// URL of an [`Estate`] photo.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct PhotoUrl(String);

impl PhotoUrl {
    /// Creates a new [`PhotoUrl`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        Self::check(&url).then_some(Self(url))
    }

    /// Checks whether the given `url` is a valid [`PhotoUrl`].
    fn check(url: impl AsRef<str>) -> bool {
        let url = url.as_ref();
        url.trim() == url
            && !url.is_empty()
            && url.len() <= 2048
            && !url.contains(char::is_whitespace)
    }
}

impl FromStr for PhotoUrl {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `PhotoUrl`")
    }
}

/// Non-empty ordered list of [`Estate`] photos.
///
/// The first [`PhotoUrl`] is the cover of the [`Estate`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Photos(Vec<PhotoUrl>);

impl Photos {
    /// Creates new [`Photos`] if the given list is not empty.
    #[must_use]
    pub fn new(photos: Vec<PhotoUrl>) -> Option<Self> {
        (!photos.is_empty()).then_some(Self(photos))
    }

    /// Returns the cover [`PhotoUrl`].
    #[must_use]
    pub fn cover(&self) -> &PhotoUrl {
        // Never empty, as checked in `Photos::new()`.
        &self.0[0]
    }

    /// Returns the number of photos.
    #[expect(clippy::len_without_is_empty, reason = "never empty")]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over all the [`PhotoUrl`]s in order.
    pub fn iter(&self) -> impl Iterator<Item = &PhotoUrl> {
        self.0.iter()
    }
}

impl From<Photos> for Vec<PhotoUrl> {
    fn from(photos: Photos) -> Self {
        photos.0
    }
}

/// Physical characteristics of an [`Estate`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Characteristics {
    /// Number of rooms.
    pub rooms: u16,

    /// Number of bathrooms.
    pub bathrooms: u16,

    /// Indicator whether a parking place is available.
    pub parking: bool,

    /// Indicator whether there is a balcony.
    pub balcony: bool,
}

/// Lifestyle rules of an [`Estate`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Lifestyle {
    /// Indicator whether smoking is allowed.
    pub smoking: bool,

    /// Indicator whether the [`Estate`] suits students.
    pub student_friendly: bool,

    /// Indicator whether the [`Estate`] suits families.
    pub family_friendly: bool,

    /// Indicator whether pets are allowed.
    pub pets_allowed: bool,

    /// [`AgeRestriction`]s of tenants, if any.
    pub age_restrictions: Vec<AgeRestriction>,
}

/// Free-form age restriction of [`Estate`] tenants, like `18+`.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct AgeRestriction(String);

impl AgeRestriction {
    /// Creates a new [`AgeRestriction`] if the given `restriction` is valid.
    #[must_use]
    pub fn new(restriction: impl Into<String>) -> Option<Self> {
        let restriction = restriction.into();
        Self::check(&restriction).then_some(Self(restriction))
    }

    /// Checks whether the given `restriction` is a valid [`AgeRestriction`].
    fn check(restriction: impl AsRef<str>) -> bool {
        let restriction = restriction.as_ref();
        restriction.trim() == restriction
            && !restriction.is_empty()
            && restriction.len() <= 64
    }
}

/// [`DateTime`] when an [`Estate`] was created.
pub type CreationDateTime = DateTimeOf<(Estate, unit::Creation)>;

#[cfg(test)]
mod spec {
    use common::Money;
    use rust_decimal::Decimal;

    use super::{City, PhotoUrl, Photos, Price, Rating};

    #[test]
    fn rejects_empty_photos() {
        assert!(Photos::new(vec![]).is_none());

        let photos = Photos::new(vec![
            PhotoUrl::new("/img/front.jpg").unwrap(),
            PhotoUrl::new("/img/kitchen.jpg").unwrap(),
        ])
        .unwrap();
        assert_eq!(photos.len(), 2);
        assert_eq!(photos.cover().to_string(), "/img/front.jpg");
    }

    #[test]
    fn validates_photo_url() {
        assert!(PhotoUrl::new("https://cdn.example.com/a.jpg").is_some());
        assert!(PhotoUrl::new("").is_none());
        assert!(PhotoUrl::new("with space.jpg").is_none());
    }

    #[test]
    fn validates_city() {
        assert!(City::new("Prishtina").is_some());
        assert!(City::new("").is_none());
        assert!(City::new(" Prizren").is_none());
    }

    #[test]
    fn rejects_negative_price() {
        assert!(Price::new(Money::eur(450)).is_some());
        assert!(Price::new(Money::eur(0)).is_some());
        assert!(Price::new(Money::eur(Decimal::NEGATIVE_ONE)).is_none());
    }

    #[test]
    fn bounds_rating() {
        assert!(Rating::new(0).is_none());
        assert_eq!(Rating::new(1).map(Rating::get), Some(1));
        assert_eq!(Rating::new(10).map(Rating::get), Some(10));
        assert!(Rating::new(11).is_none());
    }
}
