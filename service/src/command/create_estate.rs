//! [`Command`] for creating a new [`Estate`].

use common::{
    operations::{By, Insert, Select},
    Coordinates, DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::estate::{
    Characteristics, City, Lifestyle, Name, Photos, Price, Rating,
};
use crate::{
    domain::{estate, user, Estate, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Estate`] on behalf of an administrator.
#[derive(Clone, Debug)]
pub struct CreateEstate {
    /// ID of the [`User`] creating the [`Estate`].
    pub author_id: user::Id,

    /// [`Name`] of a new [`Estate`].
    pub name: estate::Name,

    /// [`City`] of a new [`Estate`].
    pub city: estate::City,

    /// [`Price`] of a new [`Estate`].
    pub price: estate::Price,

    /// [`Rating`] of a new [`Estate`], if any.
    pub rating: Option<estate::Rating>,

    /// Location of a new [`Estate`].
    pub location: Coordinates,

    /// [`Photos`] of a new [`Estate`].
    pub photos: estate::Photos,

    /// [`Characteristics`] of a new [`Estate`].
    pub characteristics: estate::Characteristics,

    /// [`Lifestyle`] of a new [`Estate`].
    pub lifestyle: estate::Lifestyle,
}

impl<Db> Command<CreateEstate> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Insert<Estate>, Err = Traced<database::Error>>,
{
    type Ok = Estate;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateEstate) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateEstate {
            author_id,
            name,
            city,
            price,
            rating,
            location,
            photos,
            characteristics,
            lifestyle,
        } = cmd;

        let author = self
            .database()
            .execute(Select(By::new(author_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(author_id))
            .map_err(tracerr::wrap!())?;
        if !author.is_admin {
            return Err(tracerr::new!(E::NotAdmin(author_id)));
        }

        let estate = Estate {
            id: estate::Id::new(),
            name,
            city,
            price,
            rating,
            location,
            photos,
            characteristics,
            lifestyle,
            created_at: DateTime::now().coerce(),
        };
        self.database()
            .execute(Insert(estate.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(estate)
    }
}

/// Error of [`CreateEstate`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Author [`User`] does not exist.
    #[display("`User(id: {_0})` does not exist")]
    UserNotExists(#[error(not(source))] user::Id),

    /// Author [`User`] is not an administrator.
    #[display("`User(id: {_0})` is not an administrator")]
    NotAdmin(#[error(not(source))] user::Id),
}
