//! [`User`]-related REST API definitions.

use axum::{http::StatusCode, Extension};
use common::DateTime;
use secrecy::SecretBox;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{self, user},
};

use crate::{api::Json, define_error, AsError, Error, Service};

/// Registered user.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier of this [`User`].
    pub id: user::Id,

    /// Username of this [`User`].
    pub username: String,

    /// Email of this [`User`].
    pub email: String,

    /// Indicator whether this [`User`] is an administrator.
    pub is_admin: bool,
}

impl From<domain::User> for User {
    fn from(user: domain::User) -> Self {
        Self {
            id: user.id,
            username: user.username.to_string(),
            email: user.email.to_string(),
            is_admin: user.is_admin,
        }
    }
}

/// Created session of a [`User`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Bearer token of this [`Session`].
    pub token: String,

    /// Moment this [`Session`] expires at.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub expires_at: DateTime,

    /// [`User`] this [`Session`] belongs to.
    pub user: User,
}

impl From<command::create_user_session::Output> for Session {
    fn from(output: command::create_user_session::Output) -> Self {
        Self {
            token: output.token.to_string(),
            expires_at: output.expires_at.coerce(),
            user: output.user.into(),
        }
    }
}

/// Request of signing up a new [`User`].
#[derive(Clone, Debug, Deserialize)]
pub struct SignUp {
    /// Username of a new [`User`].
    pub username: String,

    /// Email of a new [`User`].
    pub email: String,

    /// Password of a new [`User`].
    pub password: String,
}

/// Request of logging in as an existing [`User`].
#[derive(Clone, Debug, Deserialize)]
pub struct LogIn {
    /// Username of the [`User`].
    pub username: String,

    /// Password of the [`User`].
    pub password: String,
}

/// Signs up a new [`User`] and creates a [`Session`] for it.
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_USERNAME`, `INVALID_EMAIL`, `INVALID_PASSWORD` - the provided
///   field is malformed;
/// - `USERNAME_OCCUPIED` - the username belongs to another [`User`];
/// - `EMAIL_OCCUPIED` - the email belongs to another [`User`].
#[tracing::instrument(
    skip_all,
    fields(email = %req.email, username = %req.username),
)]
pub async fn sign_up(
    Extension(service): Extension<Service>,
    Json(req): Json<SignUp>,
) -> Result<(StatusCode, Json<Session>), Error> {
    let SignUp {
        username,
        email,
        password,
    } = req;
    let username =
        user::Username::new(username).ok_or(ValidationError::Username)?;
    let email = user::Email::new(email).ok_or(ValidationError::Email)?;
    let password =
        user::Password::new(password).ok_or(ValidationError::Password)?;

    let user = service
        .execute(command::CreateUser {
            username,
            email,
            password: SecretBox::init_with(move || password),
        })
        .await
        .map_err(AsError::into_error)?;
    let output = service
        .execute(command::CreateUserSession::ByUserId(user.id))
        .await
        .map_err(AsError::into_error)?;

    Ok((StatusCode::CREATED, Json(output.into())))
}

/// Creates a new [`Session`] by [`User`] credentials.
///
/// # Errors
///
/// Possible error codes:
/// - `WRONG_CREDENTIALS` - the credentials do not match any [`User`].
#[tracing::instrument(skip_all, fields(username = %req.username))]
pub async fn log_in(
    Extension(service): Extension<Service>,
    Json(req): Json<LogIn>,
) -> Result<Json<Session>, Error> {
    let LogIn { username, password } = req;
    // Malformed credentials cannot match any `User`.
    let username =
        user::Username::new(username).ok_or(SessionError::WrongCredentials)?;
    let password =
        user::Password::new(password).ok_or(SessionError::WrongCredentials)?;

    let output = service
        .execute(command::CreateUserSession::ByCredentials {
            username,
            password: SecretBox::init_with(move || password),
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(output.into()))
}

impl AsError for command::create_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "USERNAME_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "Username is occupied by another `User`"]
                UsernameOccupied,

                #[code = "EMAIL_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "Email is occupied by another `User`"]
                EmailOccupied,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PasswordHash(_) => None,
            Self::UsernameOccupied(_) => Some(Error::UsernameOccupied.into()),
            Self::EmailOccupied(_) => Some(Error::EmailOccupied.into()),
        }
    }
}

impl AsError for command::create_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JsonWebTokenEncodeError(_) | Self::UserNotExists(_) => None,
            Self::WrongCredentials => {
                Some(SessionError::WrongCredentials.into())
            }
        }
    }
}

define_error! {
    enum SessionError {
        #[code = "WRONG_CREDENTIALS"]
        #[status = UNAUTHORIZED]
        #[message = "Wrong username or password"]
        WrongCredentials,
    }
}

define_error! {
    enum ValidationError {
        #[code = "INVALID_USERNAME"]
        #[status = BAD_REQUEST]
        #[message = "`username` must be 2 to 100 letters, digits, `_`, `.` \
                     or `-`"]
        Username,

        #[code = "INVALID_EMAIL"]
        #[status = BAD_REQUEST]
        #[message = "`email` must be a valid email address"]
        Email,

        #[code = "INVALID_PASSWORD"]
        #[status = BAD_REQUEST]
        #[message = "`password` must be 2 to 128 characters"]
        Password,
    }
}
