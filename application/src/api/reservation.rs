//! [`Reservation`]-related REST API definitions.

use axum::{http::StatusCode, Extension};
use common::{Date, PaymentMethod};
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{self, estate, reservation, user},
    query, Query as _,
};

use crate::{
    api::{estate::EstateError, Json, Path},
    define_error, AsError, Error, Service, Session,
};

/// Reservation of an estate.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Unique identifier of this [`Reservation`].
    pub id: reservation::Id,

    /// ID of the user who made this [`Reservation`].
    pub user_id: user::Id,

    /// ID of the reserved estate.
    pub estate_id: estate::Id,

    /// Check-in date.
    pub start_date: Date,

    /// Check-out date.
    pub end_date: Date,

    /// Number of reserved nights.
    pub nights: i64,

    /// Chosen payment method.
    pub payment_method: PaymentMethod,

    /// Creation moment of this [`Reservation`].
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: reservation::CreationDateTime,
}

impl From<domain::Reservation> for Reservation {
    fn from(r: domain::Reservation) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            estate_id: r.estate_id,
            start_date: r.period.start(),
            end_date: r.period.end(),
            nights: r.period.nights(),
            payment_method: r.payment_method,
            created_at: r.created_at,
        }
    }
}

/// Response wrapping a single [`Reservation`].
#[derive(Clone, Debug, Serialize)]
pub struct Envelope {
    /// Wrapped [`Reservation`].
    pub reservation: Reservation,
}

/// Request of reserving an estate.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    /// Check-in date.
    pub start_date: Date,

    /// Check-out date.
    pub end_date: Date,

    /// ID of the estate to reserve.
    pub estate_id: estate::Id,

    /// Payment method, like `Cash` or `Card`.
    pub payment_method: PaymentMethod,
}

/// Reserves an estate on behalf of the authenticated user.
///
/// # Errors
///
/// Possible error codes:
/// - `AUTHORIZATION_REQUIRED`, `INVALID_TOKEN` - no valid [`Session`];
/// - `INVALID_PERIOD` - the start date is not before the end date;
/// - `ESTATE_NOT_EXISTS` - no estate has the requested ID;
/// - `PERIOD_OCCUPIED` - the estate is already reserved for some night of
///   the period.
#[tracing::instrument(
    skip_all,
    fields(
        end = %req.end_date,
        estate.id = %req.estate_id,
        start = %req.start_date,
        user.id = %session.user_id,
    ),
)]
pub async fn create(
    Extension(service): Extension<Service>,
    session: Session,
    Json(req): Json<NewReservation>,
) -> Result<(StatusCode, Json<Envelope>), Error> {
    let NewReservation {
        start_date,
        end_date,
        estate_id,
        payment_method,
    } = req;
    let period = reservation::Period::new(start_date, end_date)
        .map_err(|_| ValidationError::Period)?;

    let reservation = service
        .execute(command::CreateReservation {
            user_id: session.user_id,
            estate_id,
            period,
            payment_method,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope {
            reservation: reservation.into(),
        }),
    ))
}

/// Returns the authenticated user's [`Reservation`] with the requested ID.
///
/// # Errors
///
/// Possible error codes:
/// - `AUTHORIZATION_REQUIRED`, `INVALID_TOKEN` - no valid [`Session`];
/// - `RESERVATION_NOT_EXISTS` - the authenticated user has no
///   [`Reservation`] with the requested ID.
#[tracing::instrument(
    skip_all,
    fields(reservation.id = %id, user.id = %session.user_id),
)]
pub async fn get(
    Extension(service): Extension<Service>,
    session: Session,
    Path(id): Path<reservation::Id>,
) -> Result<Json<Envelope>, Error> {
    service
        .execute(query::reservation::Owned {
            id,
            owner_id: session.user_id,
        })
        .await
        .map_err(AsError::into_error)?
        .map(|r| {
            Json(Envelope {
                reservation: r.into(),
            })
        })
        .ok_or_else(|| ReservationError::NotExists.into())
}

impl AsError for command::create_reservation::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EstateNotExists(_) => Some(EstateError::NotExists.into()),
            Self::PeriodOccupied(_) => {
                Some(ReservationError::PeriodOccupied.into())
            }
        }
    }
}

define_error! {
    enum ReservationError {
        #[code = "RESERVATION_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Reservation` does not exist"]
        NotExists,

        #[code = "PERIOD_OCCUPIED"]
        #[status = CONFLICT]
        #[message = "Estate is already reserved within the period"]
        PeriodOccupied,
    }
}

define_error! {
    enum ValidationError {
        #[code = "INVALID_PERIOD"]
        #[status = BAD_REQUEST]
        #[message = "`startDate` must be before `endDate`"]
        Period,
    }
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use crate::api::test;

    fn new_reservation() -> serde_json::Value {
        json!({
            "startDate": "2023-05-16",
            "endDate": "2023-05-18",
            "estateId": "6f1d3c4e-5a2b-4c8d-9e0f-1a2b3c4d5e6f",
            "paymentMethod": "Cash",
        })
    }

    #[tokio::test]
    async fn requires_authorization() {
        let (status, body) = test::call(
            test::router(),
            test::post("/api/reservation", None, &new_reservation()),
        )
        .await;

        assert_eq!(status, http::StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "AUTHORIZATION_REQUIRED");
    }

    #[test]
    fn parses_request() {
        use common::PaymentMethod;

        use super::NewReservation;

        let req: NewReservation =
            serde_json::from_value(new_reservation()).unwrap();

        assert_eq!(req.start_date.to_string(), "2023-05-16");
        assert_eq!(req.payment_method, PaymentMethod::Cash);

        let mut unknown_method = new_reservation();
        unknown_method["paymentMethod"] = json!("Cheque");
        assert!(serde_json::from_value::<NewReservation>(unknown_method)
            .is_err());
    }
}
