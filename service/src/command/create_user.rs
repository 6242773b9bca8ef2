//! [`Command`] for creating a new [`User`].

use argon2::password_hash;
use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret, SecretBox};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::{Email, Password, Username};
use crate::{
    domain::{user, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// Name of the unique constraint on [`User`]s' [`Username`]s.
const USERNAME_CONSTRAINT: &str = "users_username_key";

/// Name of the unique constraint on [`User`]s' [`Email`]s.
const EMAIL_CONSTRAINT: &str = "users_email_key";

/// [`Command`] for creating a new [`User`].
///
/// The created [`User`] is never an administrator.
#[derive(Clone, Debug)]
pub struct CreateUser {
    /// [`Username`] of a new [`User`].
    pub username: user::Username,

    /// [`Email`] of a new [`User`].
    pub email: user::Email,

    /// [`Password`] of a new [`User`].
    pub password: SecretBox<user::Password>,
}

impl<Db> Command<CreateUser> for Service<Db>
where
    Db: for<'l> Database<
            Select<By<Option<User>, &'l user::Username>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + for<'l> Database<
            Select<By<Option<User>, &'l user::Email>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<User>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateUser {
            username,
            email,
            password,
        } = cmd;

        let occupant = self
            .database()
            .execute(Select(By::new(&username)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if occupant.is_some() {
            return Err(tracerr::new!(E::UsernameOccupied(username)));
        }

        let occupant = self
            .database()
            .execute(Select(By::new(&email)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if occupant.is_some() {
            return Err(tracerr::new!(E::EmailOccupied(email)));
        }

        let password_hash = user::PasswordHash::new(password.expose_secret())
            .map_err(tracerr::from_and_wrap!(=> E))?;
        let now = DateTime::now();
        let user = User {
            id: user::Id::new(),
            username,
            email,
            password_hash,
            is_admin: false,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let inserted = tx.execute(Insert(user.clone())).await;
        // Credentials may have been taken concurrently since the checks above.
        if let Err(e) = &inserted {
            let violates = |c: &str| e.as_ref().is_unique_violation(Some(c));
            if violates(USERNAME_CONSTRAINT) {
                return Err(tracerr::new!(E::UsernameOccupied(user.username)));
            }
            if violates(EMAIL_CONSTRAINT) {
                return Err(tracerr::new!(E::EmailOccupied(user.email)));
            }
        }
        inserted.map_err(tracerr::map_from_and_wrap!(=> E)).map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(user)
    }
}

/// Error of [`CreateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Password`] hashing error.
    #[display("Failed to hash `Password`: {_0}")]
    #[from]
    PasswordHash(password_hash::Error),

    /// [`Username`] is already occupied.
    #[display("`{_0}` username is occupied")]
    UsernameOccupied(#[error(not(source))] user::Username),

    /// [`Email`] is already occupied.
    #[display("`{_0}` email is occupied")]
    EmailOccupied(#[error(not(source))] user::Email),
}

#[cfg(test)]
mod spec {
    use secrecy::SecretBox;

    use crate::{command::test, domain::user, Command as _};

    use super::{CreateUser, ExecutionError};

    fn cmd(username: &str, email: &str) -> CreateUser {
        CreateUser {
            username: user::Username::new(username).unwrap(),
            email: user::Email::new(email).unwrap(),
            password: SecretBox::new(Box::new(
                user::Password::new("s3cret").unwrap(),
            )),
        }
    }

    #[tokio::test]
    async fn creates_regular_user() {
        let (service, db) = test::service();

        let user = service
            .execute(cmd("arta", "arta@example.com"))
            .await
            .unwrap();

        assert!(!user.is_admin);
        assert!(user
            .password_hash
            .verify(&user::Password::new("s3cret").unwrap()));
        assert_eq!(db.state().users.len(), 1);
    }

    #[tokio::test]
    async fn rejects_occupied_username() {
        let (service, db) = test::service();
        drop(service.execute(cmd("arta", "arta@example.com")).await.unwrap());

        let err = service
            .execute(cmd("arta", "other@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::UsernameOccupied(_)));
        assert_eq!(db.state().users.len(), 1);
    }

    #[tokio::test]
    async fn rejects_occupied_email() {
        let (service, _) = test::service();
        drop(service.execute(cmd("arta", "arta@example.com")).await.unwrap());

        let err = service
            .execute(cmd("dren", "arta@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::EmailOccupied(_)));
    }
}
