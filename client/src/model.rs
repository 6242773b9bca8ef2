//! Data exchanged with the REST API.

use common::{geo, Coordinates, Date, Money, PaymentMethod};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Listed estate.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Estate {
    /// Unique identifier of this [`Estate`].
    pub id: Uuid,

    /// Name of this [`Estate`].
    pub name: String,

    /// City this [`Estate`] is located in.
    pub city: String,

    /// Monthly price of this [`Estate`].
    pub price: Money,

    /// Rating of this [`Estate`] from `1` to `10`, if rated.
    #[serde(default)]
    pub rating: Option<u8>,

    /// Latitude of this [`Estate`] in decimal degrees.
    pub latitude: f64,

    /// Longitude of this [`Estate`] in decimal degrees.
    pub longitude: f64,

    /// Photo URLs of this [`Estate`], the cover first.
    pub photos: Vec<String>,

    /// Physical [`Characteristics`] of this [`Estate`].
    pub characteristics: Characteristics,

    /// [`Lifestyle`] rules of this [`Estate`].
    #[serde(default)]
    pub lifestyle: Lifestyle,
}

impl Estate {
    /// Returns [`Coordinates`] of this [`Estate`].
    ///
    /// # Errors
    ///
    /// If the latitude or the longitude is out of range.
    pub fn location(&self) -> Result<Coordinates, geo::InvalidError> {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Physical characteristics of an [`Estate`].
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
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
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Lifestyle {
    /// Indicator whether smoking is allowed.
    pub smoking: bool,

    /// Indicator whether the [`Estate`] suits students.
    pub student_friendly: bool,

    /// Indicator whether the [`Estate`] suits families.
    pub family_friendly: bool,

    /// Indicator whether pets are allowed.
    pub pets_allowed: bool,

    /// Age restrictions of tenants, like `18+`.
    pub age_restrictions: Vec<String>,
}

/// Request of reserving an [`Estate`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    /// Check-in date.
    pub start_date: Date,

    /// Check-out date.
    pub end_date: Date,

    /// ID of the [`Estate`] to reserve.
    pub estate_id: Uuid,

    /// Chosen payment method.
    pub payment_method: PaymentMethod,
}

/// Created reservation of an [`Estate`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Unique identifier of this [`Reservation`].
    pub id: Uuid,

    /// ID of the reserved [`Estate`].
    pub estate_id: Uuid,

    /// Check-in date.
    pub start_date: Date,

    /// Check-out date.
    pub end_date: Date,
}

/// Response wrapping a single [`Reservation`].
#[derive(Clone, Copy, Debug, Deserialize)]
pub(crate) struct ReservationEnvelope {
    /// Wrapped [`Reservation`].
    pub(crate) reservation: Reservation,
}

/// Request of sending a contact message.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct SendMessage<'a> {
    /// Text of the message.
    pub(crate) message: &'a str,
}

/// Status message reported by the server.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Status {
    /// Human-readable status.
    pub(crate) message: String,
}

/// Body of a rejected request.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Rejection {
    /// Machine-readable error code.
    pub(crate) code: Option<String>,

    /// Human-readable error message.
    pub(crate) message: Option<String>,
}

#[cfg(test)]
mod spec {
    use common::{geo::InvalidError, Money};

    use super::Estate;

    #[test]
    fn deserializes_listed_estate() {
        let estate: Estate = serde_json::from_str(
            r#"{
                "id": "6f1d3c4e-5a2b-4c8d-9e0f-1a2b3c4d5e6f",
                "name": "Flat near the park",
                "city": "Peja",
                "price": "450EUR",
                "rating": 8,
                "latitude": 42.66,
                "longitude": 20.29,
                "photos": ["/img/1.jpg", "/img/2.jpg"],
                "characteristics": {
                    "rooms": 2,
                    "bathrooms": 1,
                    "parking": true,
                    "balcony": false
                },
                "lifestyle": {
                    "smoking": false,
                    "studentFriendly": true,
                    "familyFriendly": true,
                    "petsAllowed": false,
                    "ageRestrictions": ["18+"]
                },
                "createdAt": "2023-05-16T10:20:30Z"
            }"#,
        )
        .unwrap();

        assert_eq!(estate.price, "450EUR".parse::<Money>().unwrap());
        assert_eq!(estate.photos.len(), 2);
        assert!(estate.lifestyle.student_friendly);
        assert_eq!(estate.lifestyle.age_restrictions, ["18+"]);
        assert!(estate.location().is_ok());
    }

    #[test]
    fn rejects_off_globe_location() {
        let estate = Estate {
            latitude: 120.0,
            ..serde_json::from_str(
                r#"{
                    "id": "6f1d3c4e-5a2b-4c8d-9e0f-1a2b3c4d5e6f",
                    "name": "Nowhere",
                    "city": "Nowhere",
                    "price": "1EUR",
                    "latitude": 0,
                    "longitude": 0,
                    "photos": ["/img/1.jpg"],
                    "characteristics": {}
                }"#,
            )
            .unwrap()
        };

        assert_eq!(estate.location(), Err(InvalidError::Latitude));
    }
}
