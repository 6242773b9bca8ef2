//! [`Query`] collection related to a single [`Reservation`].

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{reservation, user, Reservation},
    infra::{database, Database},
    Query, Service,
};

/// Queries a [`Reservation`] by its [`reservation::Id`] on behalf of a
/// [`User`].
///
/// Others' [`Reservation`]s are indistinguishable from missing ones.
///
/// [`User`]: crate::domain::User
#[derive(Clone, Copy, Debug)]
pub struct Owned {
    /// ID of the [`Reservation`] to query.
    pub id: reservation::Id,

    /// ID of the [`User`] the [`Reservation`] must belong to.
    ///
    /// [`User`]: crate::domain::User
    pub owner_id: user::Id,
}

impl<Db> Query<Owned> for Service<Db>
where
    Db: Database<
        Select<By<Option<Reservation>, reservation::Id>>,
        Ok = Option<Reservation>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Reservation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Owned { id, owner_id }: Owned,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .database()
            .execute(Select(By::new(id)))
            .await
            .map_err(tracerr::wrap!())?
            .filter(|r| r.user_id == owner_id))
    }
}
