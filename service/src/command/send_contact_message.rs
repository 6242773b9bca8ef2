//! [`Command`] for sending a [`ContactMessage`].

use common::{
    operations::{By, Insert, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::{message::Content, User};
use crate::{
    domain::{estate, message, user, ContactMessage, Estate},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for sending a [`ContactMessage`] about an [`Estate`] to its
/// owner.
#[derive(Clone, Debug)]
pub struct SendContactMessage {
    /// ID of the [`User`] sending the [`ContactMessage`].
    pub sender_id: user::Id,

    /// ID of the [`Estate`] the [`ContactMessage`] is about.
    pub estate_id: estate::Id,

    /// [`Content`] of the [`ContactMessage`].
    pub content: message::Content,
}

impl SendContactMessage {
    /// Status reported to the sender once a [`ContactMessage`] is accepted.
    pub const SENT_STATUS: &'static str = "Message sent successfully";
}

impl<Db> Command<SendContactMessage> for Service<Db>
where
    Db: Database<
            Select<By<Option<Estate>, estate::Id>>,
            Ok = Option<Estate>,
            Err = Traced<database::Error>,
        > + Database<Insert<ContactMessage>, Err = Traced<database::Error>>,
{
    type Ok = ContactMessage;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SendContactMessage,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SendContactMessage {
            sender_id,
            estate_id,
            content,
        } = cmd;

        let estate = self
            .database()
            .execute(Select(By::new(estate_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::EstateNotExists(estate_id))
            .map_err(tracerr::wrap!())?;

        let message = ContactMessage {
            id: message::Id::new(),
            sender_id,
            estate_id: estate.id,
            content,
            created_at: DateTime::now().coerce(),
        };
        self.database()
            .execute(Insert(message.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(
            message_id = %message.id,
            estate_id = %estate.id,
            "contact message stored",
        );

        Ok(message)
    }
}

/// Error of [`SendContactMessage`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Estate`] with the provided ID does not exist.
    #[display("`Estate(id: {_0})` does not exist")]
    EstateNotExists(#[error(not(source))] estate::Id),
}
