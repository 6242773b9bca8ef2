//! In-memory [`Database`] used for testing [`Command`]s.
//!
//! [`Command`]: crate::Command

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use common::operations::{By, Commit, Insert, Lock, Select, Transact};
use derive_more::{Display, Error as StdError};
use tracerr::Traced;

use crate::{
    domain::{
        estate, reservation, user, ContactMessage, Estate, Reservation, User,
    },
    infra::{database, Database},
    read,
};

/// In-memory [`Database`].
///
/// Clones share the same data. Transactions are not isolated and
/// [`Commit`] is a no-op.
#[derive(Clone, Debug, Default)]
pub struct Memory(Arc<Mutex<State>>);

/// Data stored in a [`Memory`] database.
#[derive(Debug, Default)]
pub struct State {
    /// Stored [`User`]s.
    pub users: Vec<User>,

    /// Stored [`Estate`]s.
    pub estates: Vec<Estate>,

    /// Stored [`Reservation`]s.
    pub reservations: Vec<Reservation>,

    /// Stored [`ContactMessage`]s.
    pub messages: Vec<ContactMessage>,

    /// IDs of the [`Estate`]s locked so far.
    pub locked_estates: Vec<estate::Id>,
}

impl Memory {
    /// Locks the [`State`] of this [`Memory`] database.
    pub fn state(&self) -> MutexGuard<'_, State> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// [`Memory`] database error.
#[derive(Debug, Display, StdError)]
pub enum Error {
    /// Unique constraint is violated.
    #[display("unique constraint `{_0}` is violated")]
    UniqueViolation(#[error(not(source))] &'static str),
}

impl Error {
    /// Checks whether this [`Error`] is a violation of the unique `constraint`
    /// (or of any unique constraint, if [`None`]).
    #[must_use]
    pub fn is_unique_violation(&self, constraint: Option<&str>) -> bool {
        let Self::UniqueViolation(violated) = self;
        constraint.map_or(true, |c| c == *violated)
    }
}

impl Database<Transact> for Memory {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(self.clone())
    }
}

impl Database<Commit> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        Ok(())
    }
}

impl Database<Select<By<Option<User>, user::Id>>> for Memory {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.state().users.iter().find(|u| u.id == id).cloned())
    }
}

impl<'l> Database<Select<By<Option<User>, &'l user::Username>>> for Memory {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, &'l user::Username>>,
    ) -> Result<Self::Ok, Self::Err> {
        let username = by.into_inner();
        Ok(self
            .state()
            .users
            .iter()
            .find(|u| u.username == *username)
            .cloned())
    }
}

impl<'l> Database<Select<By<Option<User>, &'l user::Email>>> for Memory {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, &'l user::Email>>,
    ) -> Result<Self::Ok, Self::Err> {
        let email = by.into_inner();
        Ok(self.state().users.iter().find(|u| u.email == *email).cloned())
    }
}

impl Database<Insert<User>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(user): Insert<User>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state();
        let violated = if state.users.iter().any(|u| {
            u.username == user.username
        }) {
            Some("users_username_key")
        } else if state.users.iter().any(|u| u.email == user.email) {
            Some("users_email_key")
        } else {
            None
        };
        if let Some(constraint) = violated {
            return Err(tracerr::new!(database::Error::from(
                Error::UniqueViolation(constraint)
            )));
        }
        state.users.push(user);
        Ok(())
    }
}

impl Database<Select<By<Option<Estate>, estate::Id>>> for Memory {
    type Ok = Option<Estate>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Estate>, estate::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.state().estates.iter().find(|e| e.id == id).cloned())
    }
}

impl Database<Select<By<Vec<Estate>, read::estate::list::Filter>>>
    for Memory
{
    type Ok = Vec<Estate>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Estate>, read::estate::list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        Ok(self
            .state()
            .estates
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }
}

impl Database<Insert<Estate>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(estate): Insert<Estate>,
    ) -> Result<Self::Ok, Self::Err> {
        self.state().estates.push(estate);
        Ok(())
    }
}

impl Database<Lock<By<Estate, estate::Id>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Estate, estate::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.state().locked_estates.push(by.into_inner());
        Ok(())
    }
}

impl Database<Select<By<Option<Reservation>, reservation::Id>>> for Memory {
    type Ok = Option<Reservation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Reservation>, reservation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .state()
            .reservations
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }
}

impl Database<Select<By<Vec<Reservation>, read::reservation::Overlapping>>>
    for Memory
{
    type Ok = Vec<Reservation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<Reservation>, read::reservation::Overlapping>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let overlapping = by.into_inner();
        Ok(self
            .state()
            .reservations
            .iter()
            .filter(|r| overlapping.matches(r))
            .cloned()
            .collect())
    }
}

impl Database<Insert<Reservation>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(reservation): Insert<Reservation>,
    ) -> Result<Self::Ok, Self::Err> {
        self.state().reservations.push(reservation);
        Ok(())
    }
}

impl Database<Insert<ContactMessage>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(message): Insert<ContactMessage>,
    ) -> Result<Self::Ok, Self::Err> {
        self.state().messages.push(message);
        Ok(())
    }
}
