//! [`Command`] for authorizing a [`Session`] of a [`User`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use jsonwebtoken::Validation;
use tracerr::Traced;

use crate::{
    domain::{
        user::{self, session, Session},
        User,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for authorizing a [`Session`] of a [`User`] by its
/// [`session::Token`].
#[derive(Clone, Debug, From)]
pub struct AuthorizeUserSession {
    /// [`Session`] token to authorize.
    pub token: session::Token,
}

impl<Db> Command<AuthorizeUserSession> for Service<Db>
where
    Db: Database<
        Select<By<Option<User>, user::Id>>,
        Ok = Option<User>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AuthorizeUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AuthorizeUserSession { token } = cmd;

        // Expiration is checked by the default `Validation`.
        let session = jsonwebtoken::decode::<Session>(
            token.as_ref(),
            &self.config().jwt_decoding_key,
            &Validation::default(),
        )
        .map_err(tracerr::from_and_wrap!(=> E))?
        .claims;

        let user_exists = self
            .database()
            .execute(Select(By::new(session.user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .is_some();
        if !user_exists {
            return Err(tracerr::new!(E::UserNotExists(session.user_id)));
        }

        Ok(session)
    }
}

/// Error of [`AuthorizeUserSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`session::Token`] is malformed, forged or expired.
    #[display("Invalid `Session` token: {_0}")]
    InvalidToken(jsonwebtoken::errors::Error),

    /// [`User`] the [`Session`] belongs to does not exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use crate::{
        command::{test, CreateUserSession},
        domain::user::session,
        Command as _, Config, Service,
    };

    use super::{AuthorizeUserSession, ExecutionError};

    #[tokio::test]
    async fn rejects_token_signed_with_other_secret() {
        let (service, db) = test::service();
        let user = test::user(&db, "arta", "s3cret");
        let forger = Service::new(
            Config::with_secret("other-secret", Duration::from_secs(60)),
            db,
        );
        let forged = forger
            .execute(CreateUserSession::ByUserId(user.id))
            .await
            .unwrap();

        let err = service
            .execute(AuthorizeUserSession {
                token: forged.token,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::InvalidToken(_)));
    }

    #[tokio::test]
    async fn rejects_garbage_token() {
        let (service, _) = test::service();

        let err = service
            .execute(AuthorizeUserSession {
                token: "not-a-jwt".parse::<session::Token>().unwrap(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::InvalidToken(_)));
    }

    #[tokio::test]
    async fn rejects_session_of_removed_user() {
        let (service, db) = test::service();
        let user = test::user(&db, "arta", "s3cret");
        let out = service
            .execute(CreateUserSession::ByUserId(user.id))
            .await
            .unwrap();
        db.state().users.clear();

        let err = service
            .execute(AuthorizeUserSession { token: out.token })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::UserNotExists(_)));
    }
}
