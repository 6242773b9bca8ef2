//! [`Command`] for reserving an [`Estate`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted},
    DateTime, PaymentMethod,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::{estate, reservation, user, Estate, Reservation},
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for reserving an [`Estate`] by a [`User`].
#[derive(Clone, Copy, Debug)]
pub struct CreateReservation {
    /// ID of the [`User`] making the [`Reservation`].
    pub user_id: user::Id,

    /// ID of the [`Estate`] to reserve.
    pub estate_id: estate::Id,

    /// [`reservation::Period`] to reserve the [`Estate`] for.
    pub period: reservation::Period,

    /// [`PaymentMethod`] chosen by the [`User`].
    pub payment_method: PaymentMethod,
}

impl<Db> Command<CreateReservation> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Estate, estate::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Estate>, estate::Id>>,
            Ok = Option<Estate>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Reservation>, read::reservation::Overlapping>>,
            Ok = Vec<Reservation>,
            Err = Traced<database::Error>,
        > + Database<Insert<Reservation>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Reservation;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateReservation,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateReservation {
            user_id,
            estate_id,
            period,
            payment_method,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Serializes concurrent reservations of the same `Estate`, so the
        // overlap check below cannot race.
        tx.execute(Lock(By::new(estate_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        drop(
            tx.execute(Select(By::new(estate_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::EstateNotExists(estate_id))
                .map_err(tracerr::wrap!())?,
        );

        let overlapping = tx
            .execute(Select(By::new(read::reservation::Overlapping {
                estate_id,
                period,
            })))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !overlapping.is_empty() {
            return Err(tracerr::new!(E::PeriodOccupied(period)));
        }

        let reservation = Reservation {
            id: reservation::Id::new(),
            user_id,
            estate_id,
            period,
            payment_method,
            created_at: DateTime::now().coerce(),
        };
        tx.execute(Insert(reservation.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(reservation)
    }
}

/// Error of [`CreateReservation`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Estate`] with the provided ID does not exist.
    #[display("`Estate(id: {_0})` does not exist")]
    EstateNotExists(#[error(not(source))] estate::Id),

    /// [`Estate`] is already reserved for some night of the period.
    #[display("`Estate` is already reserved within `{_0}`")]
    PeriodOccupied(#[error(not(source))] reservation::Period),
}

#[cfg(test)]
mod spec {
    use common::{Date, PaymentMethod};

    use crate::{
        command::test,
        domain::{estate, reservation, user},
        Command as _,
    };

    use super::{CreateReservation, ExecutionError};

    fn cmd(
        user_id: user::Id,
        estate_id: estate::Id,
        start: &str,
        end: &str,
    ) -> CreateReservation {
        CreateReservation {
            user_id,
            estate_id,
            period: reservation::Period::new(
                start.parse::<Date>().unwrap(),
                end.parse::<Date>().unwrap(),
            )
            .unwrap(),
            payment_method: PaymentMethod::Cash,
        }
    }

    #[tokio::test]
    async fn reserves_free_estate() {
        let (service, db) = test::service();
        let user = test::user(&db, "arta", "s3cret");
        let estate = test::estate(&db, "Prishtina");

        let reservation = service
            .execute(cmd(user.id, estate.id, "2023-05-16", "2023-05-18"))
            .await
            .unwrap();

        assert_eq!(reservation.user_id, user.id);
        assert_eq!(reservation.estate_id, estate.id);
        assert_eq!(reservation.payment_method, PaymentMethod::Cash);
        let state = db.state();
        assert_eq!(state.reservations.len(), 1);
        assert_eq!(state.locked_estates, vec![estate.id]);
    }

    #[tokio::test]
    async fn rejects_overlapping_period() {
        let (service, db) = test::service();
        let user = test::user(&db, "arta", "s3cret");
        let estate = test::estate(&db, "Prishtina");
        drop(
            service
                .execute(cmd(user.id, estate.id, "2023-05-16", "2023-05-18"))
                .await
                .unwrap(),
        );

        let err = service
            .execute(cmd(user.id, estate.id, "2023-05-17", "2023-05-19"))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::PeriodOccupied(_)));
        assert_eq!(db.state().reservations.len(), 1);
    }

    #[tokio::test]
    async fn allows_back_to_back_periods() {
        let (service, db) = test::service();
        let user = test::user(&db, "arta", "s3cret");
        let estate = test::estate(&db, "Prishtina");
        drop(
            service
                .execute(cmd(user.id, estate.id, "2023-05-16", "2023-05-18"))
                .await
                .unwrap(),
        );

        drop(
            service
                .execute(cmd(user.id, estate.id, "2023-05-18", "2023-05-20"))
                .await
                .unwrap(),
        );

        assert_eq!(db.state().reservations.len(), 2);
    }

    #[tokio::test]
    async fn same_period_of_other_estate_is_free() {
        let (service, db) = test::service();
        let user = test::user(&db, "arta", "s3cret");
        let first = test::estate(&db, "Prishtina");
        let second = test::estate(&db, "Peja");
        drop(
            service
                .execute(cmd(user.id, first.id, "2023-05-16", "2023-05-18"))
                .await
                .unwrap(),
        );

        assert!(service
            .execute(cmd(user.id, second.id, "2023-05-16", "2023-05-18"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn rejects_unknown_estate() {
        let (service, db) = test::service();
        let user = test::user(&db, "arta", "s3cret");

        let unknown = estate::Id::new();

        let err = service
            .execute(cmd(user.id, unknown, "2023-05-16", "2023-05-18"))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::EstateNotExists(_)));
    }
}
