//! [`Reservation`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{reservation, Reservation},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Builds a [`Reservation`] out of a `reservations` [`Row`].
///
/// # Panics
///
/// If the [`Row`] contains an inverted [`reservation::Period`].
fn from_row(row: &Row) -> Reservation {
    Reservation {
        id: row.get("id"),
        user_id: row.get("user_id"),
        estate_id: row.get("estate_id"),
        period: reservation::Period::new(
            row.get("start_date"),
            row.get("end_date"),
        )
        .expect("`start_date` is not before `end_date`"),
        payment_method: row.get("payment_method"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<Reservation>, reservation::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Reservation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Reservation>, reservation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, user_id, estate_id, \
                   start_date, end_date, payment_method, \
                   created_at \
            FROM reservations \
            WHERE id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C>
    Database<Select<By<Vec<Reservation>, read::reservation::Overlapping>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Reservation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<Reservation>, read::reservation::Overlapping>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::reservation::Overlapping { estate_id, period } =
            by.into_inner();
        let (start, end) = (period.start(), period.end());

        // Check-out day is free for the next check-in.
        const SQL: &str = "\
            SELECT id, user_id, estate_id, \
                   start_date, end_date, payment_method, \
                   created_at \
            FROM reservations \
            WHERE estate_id = $1::UUID \
              AND start_date < $3::DATE \
              AND $2::DATE < end_date \
            ORDER BY start_date ASC";
        Ok(self
            .query(SQL, &[&estate_id, &start, &end])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<Reservation>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(reservation): Insert<Reservation>,
    ) -> Result<Self::Ok, Self::Err> {
        let Reservation {
            id,
            user_id,
            estate_id,
            period,
            payment_method,
            created_at,
        } = reservation;
        let (start, end) = (period.start(), period.end());

        const SQL: &str = "\
            INSERT INTO reservations (\
                id, user_id, estate_id, \
                start_date, end_date, payment_method, \
                created_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::UUID, \
                $4::DATE, $5::DATE, $6::INT2, \
                $7::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &user_id,
                &estate_id,
                &start,
                &end,
                &payment_method,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
