//! Geographic [`Coordinates`] and great-circle [`Distance`].

use std::fmt;

use derive_more::{Display, Error};

/// Mean radius of the Earth in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.071;

/// Point on the Earth surface in decimal degrees.
///
/// Both components are always finite and within their valid ranges, so any
/// computation over [`Coordinates`] is well-defined.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    /// Latitude in `[-90, 90]` degrees.
    latitude: f64,

    /// Longitude in `[-180, 180]` degrees.
    longitude: f64,
}

impl Coordinates {
    /// Creates new [`Coordinates`] if the provided degrees are valid.
    ///
    /// # Errors
    ///
    /// If any of the components is not finite or is out of its range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidError::Latitude);
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidError::Longitude);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Returns the latitude of these [`Coordinates`] in decimal degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude of these [`Coordinates`] in decimal degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Computes the great-circle [`Distance`] to the `other` [`Coordinates`]
    /// using the haversine formula.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> Distance {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = lat2 - lat1;
        let dlon = other.longitude.to_radians() - self.longitude.to_radians();

        let a = (dlat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        // Rounding may push `a` slightly above 1 for antipodal points.
        let a = a.clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        Distance::from_km(EARTH_RADIUS_KM * c)
    }
}

/// Error of creating [`Coordinates`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum InvalidError {
    /// Latitude is not a finite number in `[-90, 90]`.
    #[display("latitude must be a finite number in [-90, 90]")]
    Latitude,

    /// Longitude is not a finite number in `[-180, 180]`.
    #[display("longitude must be a finite number in [-180, 180]")]
    Longitude,
}

/// Surface distance in kilometers, rounded to two decimal places.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Distance(f64);

impl Distance {
    /// Creates a new [`Distance`] rounding the provided kilometers to two
    /// decimal places.
    #[must_use]
    pub fn from_km(km: f64) -> Self {
        Self((km * 100.0).round() / 100.0)
    }

    /// Returns this [`Distance`] in kilometers.
    #[must_use]
    pub const fn km(self) -> f64 {
        self.0
    }
}

impl Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}km", self.0)
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use serde::{
        de::Error, ser::SerializeStruct as _, Deserialize, Deserializer,
        Serialize, Serializer,
    };

    use super::{Coordinates, Distance};

    impl Serialize for Coordinates {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut s = serializer.serialize_struct("Coordinates", 2)?;
            s.serialize_field("latitude", &self.latitude)?;
            s.serialize_field("longitude", &self.longitude)?;
            s.end()
        }
    }

    impl<'de> Deserialize<'de> for Coordinates {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            /// Unchecked representation of [`Coordinates`].
            #[derive(Deserialize)]
            struct Raw {
                latitude: f64,
                longitude: f64,
            }

            let Raw {
                latitude,
                longitude,
            } = Raw::deserialize(deserializer)?;
            Coordinates::new(latitude, longitude).map_err(Error::custom)
        }
    }

    impl Serialize for Distance {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_f64(self.km())
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Coordinates, Distance, InvalidError};

    fn point(lat: f64, lon: f64) -> Coordinates {
        Coordinates::new(lat, lon).unwrap()
    }

    fn assert_close(actual: Distance, expected_km: f64) {
        let error = (actual.km() - expected_km).abs() / expected_km;
        assert!(
            error < 0.01,
            "{actual} is not within 1% of {expected_km}km",
        );
    }

    #[test]
    fn same_point_is_zero() {
        let prishtina = point(42.662_913_8, 21.165_502_8);

        assert_eq!(prishtina.distance_to(&prishtina).km(), 0.0);
        assert_eq!(prishtina.distance_to(&prishtina).to_string(), "0.00km");
    }

    #[test]
    fn is_symmetric() {
        let prishtina = point(42.662_913_8, 21.165_502_8);
        let new_york = point(40.712_8, -74.006_0);

        assert_eq!(
            prishtina.distance_to(&new_york),
            new_york.distance_to(&prishtina),
        );
    }

    #[test]
    fn one_degree_at_equator() {
        let distance = point(0.0, 0.0).distance_to(&point(1.0, 0.0));

        assert_close(distance, 111.32);
    }

    #[test]
    fn known_city_pair() {
        let paris = point(48.856_6, 2.352_2);
        let london = point(51.507_4, -0.127_8);

        assert_close(paris.distance_to(&london), 343.5);
    }

    #[test]
    fn antipodes_are_half_circumference() {
        let distance = point(0.0, 0.0).distance_to(&point(0.0, 180.0));

        assert_close(distance, std::f64::consts::PI * super::EARTH_RADIUS_KM);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(Distance::from_km(76.954_9).km(), 76.95);
        assert_eq!(Distance::from_km(76.955_1).to_string(), "76.96km");
    }

    #[test]
    fn rejects_invalid_degrees() {
        assert_eq!(Coordinates::new(90.1, 0.0), Err(InvalidError::Latitude));
        assert_eq!(
            Coordinates::new(f64::NAN, 0.0),
            Err(InvalidError::Latitude),
        );
        assert_eq!(
            Coordinates::new(0.0, -180.5),
            Err(InvalidError::Longitude),
        );
        assert_eq!(
            Coordinates::new(0.0, f64::INFINITY),
            Err(InvalidError::Longitude),
        );
        assert!(Coordinates::new(-90.0, 180.0).is_ok());
    }
}
