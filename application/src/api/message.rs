//! Contact message REST API definitions.

use axum::Extension;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{estate, message},
};

use crate::{
    api::{estate::EstateError, Json, Path},
    define_error, AsError, Error, Service, Session,
};

/// Request of sending a contact message to an estate owner.
#[derive(Clone, Debug, Deserialize)]
pub struct SendMessage {
    /// Text of the message.
    pub message: String,
}

/// Status of a processed request.
#[derive(Clone, Debug, Serialize)]
pub struct Status {
    /// Human-readable status message.
    pub message: String,
}

/// Sends a contact message about an estate on behalf of the authenticated
/// user.
///
/// # Errors
///
/// Possible error codes:
/// - `AUTHORIZATION_REQUIRED`, `INVALID_TOKEN` - no valid [`Session`];
/// - `INVALID_MESSAGE` - the message is blank or too long;
/// - `ESTATE_NOT_EXISTS` - no estate has the requested ID.
#[tracing::instrument(
    skip_all,
    fields(estate.id = %estate_id, user.id = %session.user_id),
)]
pub async fn send(
    Extension(service): Extension<Service>,
    session: Session,
    Path(estate_id): Path<estate::Id>,
    Json(req): Json<SendMessage>,
) -> Result<Json<Status>, Error> {
    let content = message::Content::new(req.message)
        .ok_or(ValidationError::Message)?;

    drop(
        service
            .execute(command::SendContactMessage {
                sender_id: session.user_id,
                estate_id,
                content,
            })
            .await
            .map_err(AsError::into_error)?,
    );

    Ok(Json(Status {
        message: command::SendContactMessage::SENT_STATUS.to_owned(),
    }))
}

impl AsError for command::send_contact_message::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EstateNotExists(_) => Some(EstateError::NotExists.into()),
        }
    }
}

define_error! {
    enum ValidationError {
        #[code = "INVALID_MESSAGE"]
        #[status = BAD_REQUEST]
        #[message = "`message` must be non-blank and at most 2000 \
                     characters"]
        Message,
    }
}
