//! [`Command`] definition.

pub mod authorize_user_session;
pub mod create_estate;
pub mod create_reservation;
pub mod create_user;
pub mod create_user_session;
pub mod send_contact_message;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_user_session::AuthorizeUserSession, create_estate::CreateEstate,
    create_reservation::CreateReservation, create_user::CreateUser,
    create_user_session::CreateUserSession,
    send_contact_message::SendContactMessage,
};

#[cfg(test)]
pub(crate) mod test {
    //! Fixtures for [`Command`] and [`Query`] tests.
    //!
    //! [`Query`]: crate::Query

    use std::time::Duration;

    use common::{Coordinates, Date, DateTime, Money, PaymentMethod};

    use crate::{
        domain::{estate, reservation, user, Estate, Reservation, User},
        infra::database::Memory,
        Config, Service,
    };

    /// Creates a new [`Service`] over an empty [`Memory`] database.
    pub(crate) fn service() -> (Service<Memory>, Memory) {
        let db = Memory::default();
        let config =
            Config::with_secret("test-secret", Duration::from_secs(30 * 60));
        (Service::new(config, db.clone()), db)
    }

    /// Stores a new [`User`] with the provided `password` in the `db`.
    pub(crate) fn user(db: &Memory, username: &str, password: &str) -> User {
        let now = DateTime::now();
        let user = User {
            id: user::Id::new(),
            username: user::Username::new(username).unwrap(),
            email: user::Email::new(format!("{username}@example.com"))
                .unwrap(),
            password_hash: user::PasswordHash::new(
                &user::Password::new(password).unwrap(),
            )
            .unwrap(),
            is_admin: false,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };
        db.state().users.push(user.clone());
        user
    }

    /// Stores a new administrator [`User`] in the `db`.
    pub(crate) fn admin(db: &Memory) -> User {
        let mut admin = user(db, "admin", "admin-password");
        admin.is_admin = true;
        db.state().users.retain(|u| u.id != admin.id);
        db.state().users.push(admin.clone());
        admin
    }

    /// Stores a new [`Estate`] located in the provided `city` in the `db`.
    pub(crate) fn estate(db: &Memory, city: &str) -> Estate {
        let estate = Estate {
            id: estate::Id::new(),
            name: estate::Name::new(format!("Flat in {city}")).unwrap(),
            city: estate::City::new(city).unwrap(),
            price: estate::Price::new(Money::eur(450)).unwrap(),
            rating: estate::Rating::new(8),
            location: Coordinates::new(42.66, 21.16).unwrap(),
            photos: estate::Photos::new(vec![
                estate::PhotoUrl::new("/img/1.jpg").unwrap(),
            ])
            .unwrap(),
            characteristics: estate::Characteristics::default(),
            lifestyle: estate::Lifestyle::default(),
            created_at: DateTime::now().coerce(),
        };
        db.state().estates.push(estate.clone());
        estate
    }

    /// Stores a new [`Reservation`] of the [`Estate`] by the [`User`] for
    /// the `start..end` period in the `db`.
    pub(crate) fn reservation(
        db: &Memory,
        user_id: user::Id,
        estate_id: estate::Id,
        (start, end): (&str, &str),
    ) -> Reservation {
        let reservation = Reservation {
            id: reservation::Id::new(),
            user_id,
            estate_id,
            period: reservation::Period::new(
                start.parse::<Date>().unwrap(),
                end.parse::<Date>().unwrap(),
            )
            .unwrap(),
            payment_method: PaymentMethod::Cash,
            created_at: DateTime::now().coerce(),
        };
        db.state().reservations.push(reservation.clone());
        reservation
    }
}
