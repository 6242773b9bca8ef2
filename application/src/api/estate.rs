//! [`Estate`]-related REST API definitions.

use axum::{http::StatusCode, Extension};
use common::{Coordinates, Money};
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{self, estate},
    query,
    read::estate::list::Filter,
    Query as _,
};

use crate::{
    api::{Json, Path, Query},
    define_error, AsError, Error, Service, Session,
};

/// Listed estate.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Estate {
    /// Unique identifier of this [`Estate`].
    pub id: estate::Id,

    /// Name of this [`Estate`].
    pub name: String,

    /// City this [`Estate`] is located in.
    pub city: String,

    /// Monthly price of this [`Estate`], like `450EUR`.
    pub price: Money,

    /// Rating of this [`Estate`] from `1` to `10`, if rated.
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
    pub lifestyle: Lifestyle,

    /// Creation moment of this [`Estate`].
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: estate::CreationDateTime,
}

impl From<domain::Estate> for Estate {
    fn from(estate: domain::Estate) -> Self {
        let domain::Estate {
            id,
            name,
            city,
            price,
            rating,
            location,
            photos,
            characteristics,
            lifestyle,
            created_at,
        } = estate;

        Self {
            id,
            name: name.to_string(),
            city: city.to_string(),
            price: price.money(),
            rating: rating.map(estate::Rating::get),
            latitude: location.latitude(),
            longitude: location.longitude(),
            photos: photos.iter().map(ToString::to_string).collect(),
            characteristics: characteristics.into(),
            lifestyle: lifestyle.into(),
            created_at,
        }
    }
}

/// Physical characteristics of an [`Estate`].
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Characteristics {
    /// Number of rooms.
    pub rooms: u16,

    /// Number of bathrooms.
    pub bathrooms: u16,

    /// Indicator whether a parking place is available.
    #[serde(default)]
    pub parking: bool,

    /// Indicator whether there is a balcony.
    #[serde(default)]
    pub balcony: bool,
}

impl From<estate::Characteristics> for Characteristics {
    fn from(c: estate::Characteristics) -> Self {
        Self {
            rooms: c.rooms,
            bathrooms: c.bathrooms,
            parking: c.parking,
            balcony: c.balcony,
        }
    }
}

impl From<Characteristics> for estate::Characteristics {
    fn from(c: Characteristics) -> Self {
        Self {
            rooms: c.rooms,
            bathrooms: c.bathrooms,
            parking: c.parking,
            balcony: c.balcony,
        }
    }
}

/// Lifestyle rules of an [`Estate`].
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
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

impl From<estate::Lifestyle> for Lifestyle {
    fn from(l: estate::Lifestyle) -> Self {
        Self {
            smoking: l.smoking,
            student_friendly: l.student_friendly,
            family_friendly: l.family_friendly,
            pets_allowed: l.pets_allowed,
            age_restrictions: l
                .age_restrictions
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Query parameters of [`list`]ing [`Estate`]s.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListParams {
    /// City to select [`Estate`]s from.
    pub city: Option<String>,
}

/// Lists all the [`Estate`]s, or only the ones in the requested city.
///
/// # Errors
///
/// If the database fails.
#[tracing::instrument(skip_all, fields(city = ?params.city))]
pub async fn list(
    Extension(service): Extension<Service>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Estate>>, Error> {
    let city = match params.city {
        None => None,
        Some(raw) => match estate::City::new(raw) {
            Some(city) => Some(city),
            // No `Estate` is located in an invalid city.
            None => return Ok(Json(vec![])),
        },
    };

    let estates = service
        .execute(query::estates::List::by(Filter { city }))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(estates.into_iter().map(Into::into).collect()))
}

/// Returns the [`Estate`] with the requested ID.
///
/// # Errors
///
/// Possible error codes:
/// - `ESTATE_NOT_EXISTS` - no [`Estate`] has the requested ID.
#[tracing::instrument(skip_all, fields(estate.id = %id))]
pub async fn get(
    Extension(service): Extension<Service>,
    Path(id): Path<estate::Id>,
) -> Result<Json<Estate>, Error> {
    service
        .execute(query::estate::ById::by(id))
        .await
        .map_err(AsError::into_error)?
        .map(|e| Json(e.into()))
        .ok_or_else(|| EstateError::NotExists.into())
}

/// Request of creating a new [`Estate`].
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEstate {
    /// Name of a new [`Estate`].
    pub name: String,

    /// City of a new [`Estate`].
    pub city: String,

    /// Monthly price of a new [`Estate`], like `450EUR`.
    pub price: Money,

    /// Rating of a new [`Estate`] from `1` to `10`.
    #[serde(default)]
    pub rating: Option<u8>,

    /// Latitude of a new [`Estate`] in decimal degrees.
    pub latitude: f64,

    /// Longitude of a new [`Estate`] in decimal degrees.
    pub longitude: f64,

    /// Photo URLs of a new [`Estate`], the cover first.
    pub photos: Vec<String>,

    /// Physical [`Characteristics`] of a new [`Estate`].
    pub characteristics: Characteristics,

    /// [`Lifestyle`] rules of a new [`Estate`].
    #[serde(default)]
    pub lifestyle: Lifestyle,
}

impl NewEstate {
    /// Validates this [`NewEstate`] into a [`command::CreateEstate`] on
    /// behalf of the provided author.
    fn into_command(
        self,
        author_id: domain::user::Id,
    ) -> Result<command::CreateEstate, ValidationError> {
        use ValidationError as E;

        let Self {
            name,
            city,
            price,
            rating,
            latitude,
            longitude,
            photos,
            characteristics,
            lifestyle,
        } = self;

        let photos = photos
            .into_iter()
            .map(estate::PhotoUrl::new)
            .collect::<Option<Vec<_>>>()
            .and_then(estate::Photos::new)
            .ok_or(E::Photos)?;
        let age_restrictions = lifestyle
            .age_restrictions
            .into_iter()
            .map(estate::AgeRestriction::new)
            .collect::<Option<Vec<_>>>()
            .ok_or(E::AgeRestriction)?;

        Ok(command::CreateEstate {
            author_id,
            name: estate::Name::new(name).ok_or(E::Name)?,
            city: estate::City::new(city).ok_or(E::City)?,
            price: estate::Price::new(price).ok_or(E::Price)?,
            rating: rating
                .map(|r| estate::Rating::new(r).ok_or(E::Rating))
                .transpose()?,
            location: Coordinates::new(latitude, longitude)
                .map_err(|_| E::Coordinates)?,
            photos,
            characteristics: characteristics.into(),
            lifestyle: estate::Lifestyle {
                smoking: lifestyle.smoking,
                student_friendly: lifestyle.student_friendly,
                family_friendly: lifestyle.family_friendly,
                pets_allowed: lifestyle.pets_allowed,
                age_restrictions,
            },
        })
    }
}

/// Creates a new [`Estate`] on behalf of the authenticated administrator.
///
/// # Errors
///
/// Possible error codes:
/// - `AUTHORIZATION_REQUIRED`, `INVALID_TOKEN` - no valid [`Session`];
/// - `NOT_ADMIN` - the authenticated user is not an administrator;
/// - `INVALID_*` - the provided [`NewEstate`] is invalid.
#[tracing::instrument(
    skip_all,
    fields(city = %req.city, name = %req.name, user.id = %session.user_id),
)]
pub async fn create(
    Extension(service): Extension<Service>,
    session: Session,
    Json(req): Json<NewEstate>,
) -> Result<(StatusCode, Json<Estate>), Error> {
    let cmd = req.into_command(session.user_id)?;

    let estate = service
        .execute(cmd)
        .await
        .map_err(AsError::into_error)?;

    Ok((StatusCode::CREATED, Json(estate.into())))
}

impl AsError for command::create_estate::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "NOT_ADMIN"]
                #[status = FORBIDDEN]
                #[message = "Authenticated `User` must be an administrator"]
                NotAdmin,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotAdmin(_) => Some(Error::NotAdmin.into()),
            Self::UserNotExists(_) => None,
        }
    }
}

define_error! {
    enum EstateError {
        #[code = "ESTATE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Estate` does not exist"]
        NotExists,
    }
}

define_error! {
    enum ValidationError {
        #[code = "INVALID_NAME"]
        #[status = BAD_REQUEST]
        #[message = "`name` must be non-blank and at most 512 characters"]
        Name,

        #[code = "INVALID_CITY"]
        #[status = BAD_REQUEST]
        #[message = "`city` must be non-blank and at most 512 characters"]
        City,

        #[code = "INVALID_PRICE"]
        #[status = BAD_REQUEST]
        #[message = "`price` must not be negative"]
        Price,

        #[code = "INVALID_RATING"]
        #[status = BAD_REQUEST]
        #[message = "`rating` must be from 1 to 10"]
        Rating,

        #[code = "INVALID_COORDINATES"]
        #[status = BAD_REQUEST]
        #[message = "`latitude` must be in [-90, 90] and `longitude` in \
                     [-180, 180]"]
        Coordinates,

        #[code = "INVALID_PHOTOS"]
        #[status = BAD_REQUEST]
        #[message = "`photos` must be a non-empty list of URLs"]
        Photos,

        #[code = "INVALID_AGE_RESTRICTION"]
        #[status = BAD_REQUEST]
        #[message = "`ageRestrictions` must be non-blank and at most 64 \
                     characters"]
        AgeRestriction,
    }
}

#[cfg(test)]
mod spec {
    use axum::body::Body;
    use serde_json::json;

    use crate::api::test;

    fn new_estate() -> serde_json::Value {
        json!({
            "name": "Flat near the park",
            "city": "Prishtina",
            "price": "450EUR",
            "latitude": 42.66,
            "longitude": 21.16,
            "photos": ["/img/1.jpg"],
            "characteristics": {"rooms": 2, "bathrooms": 1},
        })
    }

    #[tokio::test]
    async fn create_requires_authorization() {
        let (status, body) = test::call(
            test::router(),
            test::post("/api/estates", None, &new_estate()),
        )
        .await;

        assert_eq!(status, http::StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "AUTHORIZATION_REQUIRED");
    }

    #[tokio::test]
    async fn create_rejects_forged_token() {
        let (status, body) = test::call(
            test::router(),
            test::post("/api/estates", Some("not.a.jwt"), &new_estate()),
        )
        .await;

        assert_eq!(status, http::StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "INVALID_TOKEN");
    }

    #[tokio::test]
    async fn get_rejects_malformed_id() {
        let request = http::Request::get("/api/estates/not-a-uuid")
            .body(Body::empty())
            .unwrap();

        let (status, body) = test::call(test::router(), request).await;

        assert_eq!(status, http::StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_PATH");
    }

    #[tokio::test]
    async fn list_by_invalid_city_is_empty() {
        let request = http::Request::get("/api/estates?city=%20Peja")
            .body(Body::empty())
            .unwrap();

        let (status, body) = test::call(test::router(), request).await;

        assert_eq!(status, http::StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[test]
    fn validates_new_estate() {
        use service::domain::user;

        use super::{NewEstate, ValidationError};

        let parse = |value: serde_json::Value| {
            serde_json::from_value::<NewEstate>(value)
                .unwrap()
                .into_command(user::Id::new())
        };

        let cmd = parse(new_estate()).unwrap();
        assert_eq!(cmd.city.to_string(), "Prishtina");
        assert_eq!(cmd.photos.len(), 1);
        assert!(cmd.rating.is_none());

        let mut no_photos = new_estate();
        no_photos["photos"] = json!([]);
        assert!(matches!(parse(no_photos), Err(ValidationError::Photos)));

        let mut off_globe = new_estate();
        off_globe["latitude"] = json!(91.0);
        assert!(matches!(
            parse(off_globe),
            Err(ValidationError::Coordinates),
        ));

        let mut overrated = new_estate();
        overrated["rating"] = json!(11);
        assert!(matches!(parse(overrated), Err(ValidationError::Rating)));

        let mut free = new_estate();
        free["price"] = json!("-1EUR");
        assert!(matches!(parse(free), Err(ValidationError::Price)));
    }
}
