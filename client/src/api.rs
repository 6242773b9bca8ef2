//! Typed access to the REST API.

use derive_more::{Debug, Display, Error as StdError, From};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing as log;
use uuid::Uuid;

use crate::{
    model::{
        self, Estate, NewReservation, Rejection, Reservation,
        ReservationEnvelope, Status,
    },
    Config,
};

pub use common::Handler as Api;

/// Bearer credential of an authenticated user.
#[derive(Clone, Debug, Eq, From, PartialEq)]
#[debug("Token(..)")]
pub struct Token(String);

impl Token {
    /// Creates a new [`Token`] out of the provided raw credential.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw credential of this [`Token`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Request listing all the [`Estate`]s.
#[derive(Clone, Copy, Debug)]
pub struct ListEstates;

/// Request fetching the [`Estate`] with the provided ID.
#[derive(Clone, Copy, Debug)]
pub struct GetEstate(pub Uuid);

/// Request sending a contact message about an [`Estate`].
#[derive(Clone, Debug)]
pub struct SendMessage {
    /// [`Token`] of the sender.
    pub token: Token,

    /// ID of the [`Estate`] the message is about.
    pub estate_id: Uuid,

    /// Text of the message.
    pub message: String,
}

/// Request reserving an [`Estate`].
#[derive(Clone, Debug)]
pub struct Reserve {
    /// [`Token`] of the reserving user.
    pub token: Token,

    /// Requested [`NewReservation`].
    pub reservation: NewReservation,
}

/// Error of an [`Api`] call.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Server could not be reached or the response could not be read.
    #[display("request failed: {_0}")]
    #[from]
    Transport(reqwest::Error),

    /// Server rejected the request.
    #[display("server responded with `{status}`")]
    Rejected {
        /// HTTP status code of the response.
        status: u16,

        /// Machine-readable error code, if reported.
        code: Option<String>,

        /// Human-readable error message, if reported.
        message: Option<String>,
    },

    /// Successful response has an unexpected body.
    #[display("unexpected response body: {_0}")]
    Decode(reqwest::Error),
}

impl Error {
    /// Returns the HTTP status code, if the server rejected the request.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Returns the human-readable message reported by the server, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Indicates whether the server refused the provided credential.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED.as_u16())
    }

    /// Indicates whether the requested resource does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }
}

/// [`Api`] implementation over HTTP.
#[derive(Clone, Debug)]
pub struct HttpApi {
    /// Underlying HTTP client.
    client: reqwest::Client,

    /// Base URL of the REST API, without a trailing slash.
    base_url: String,
}

impl HttpApi {
    /// Creates a new [`HttpApi`] out of the provided [`Config`].
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Returns the absolute URL of the provided API `path`.
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends the provided request and decodes its successful response.
    async fn send<T: DeserializeOwned>(
        req: RequestBuilder,
    ) -> Result<T, Error> {
        let resp = req.send().await.map_err(|e| {
            log::warn!("failed to reach server: {e}");
            Error::Transport(e)
        })?;

        let status = resp.status();
        if !status.is_success() {
            let Rejection { code, message } =
                resp.json().await.unwrap_or_default();
            log::debug!(
                status = status.as_u16(),
                code = code.as_deref(),
                "request rejected",
            );
            return Err(Error::Rejected {
                status: status.as_u16(),
                code,
                message,
            });
        }

        resp.json().await.map_err(|e| {
            log::warn!("failed to decode response: {e}");
            Error::Decode(e)
        })
    }
}

impl Api<ListEstates> for HttpApi {
    type Ok = Vec<Estate>;
    type Err = Error;

    async fn execute(&self, _: ListEstates) -> Result<Self::Ok, Self::Err> {
        Self::send(self.client.get(self.url("/api/estates"))).await
    }
}

impl Api<GetEstate> for HttpApi {
    type Ok = Estate;
    type Err = Error;

    async fn execute(&self, req: GetEstate) -> Result<Self::Ok, Self::Err> {
        let GetEstate(id) = req;
        Self::send(self.client.get(self.url(&format!("/api/estates/{id}"))))
            .await
    }
}

impl Api<SendMessage> for HttpApi {
    type Ok = String;
    type Err = Error;

    async fn execute(&self, req: SendMessage) -> Result<Self::Ok, Self::Err> {
        let SendMessage {
            token,
            estate_id,
            message,
        } = req;

        let url = self.url(&format!("/api/users/send-email/{estate_id}"));
        let Status { message } = Self::send(
            self.client
                .post(url)
                .bearer_auth(token.as_str())
                .json(&model::SendMessage { message: &message }),
        )
        .await?;
        Ok(message)
    }
}

impl Api<Reserve> for HttpApi {
    type Ok = Reservation;
    type Err = Error;

    async fn execute(&self, req: Reserve) -> Result<Self::Ok, Self::Err> {
        let Reserve { token, reservation } = req;

        let ReservationEnvelope { reservation } = Self::send(
            self.client
                .post(self.url("/api/reservation"))
                .bearer_auth(token.as_str())
                .json(&reservation),
        )
        .await?;
        Ok(reservation)
    }
}

#[cfg(test)]
mod spec {
    use crate::Config;

    use super::{Error, HttpApi, Token};

    #[test]
    fn hides_token_in_debug() {
        let token = Token::new("eyJhbGciOi.secret.part");

        assert_eq!(format!("{token:?}"), "Token(..)");
        assert_eq!(token.as_str(), "eyJhbGciOi.secret.part");
    }

    #[test]
    fn trims_trailing_slash() {
        let api = HttpApi::new(&Config {
            base_url: "https://estates.example.com/".to_owned(),
            ..Config::default()
        });

        assert_eq!(
            api.url("/api/estates"),
            "https://estates.example.com/api/estates",
        );
    }

    #[test]
    fn classifies_rejections() {
        let err = Error::Rejected {
            status: 401,
            code: Some("INVALID_TOKEN".to_owned()),
            message: Some("Invalid token".to_owned()),
        };

        assert!(err.is_unauthorized());
        assert!(!err.is_not_found());
        assert_eq!(err.message(), Some("Invalid token"));
        assert_eq!(err.to_string(), "server responded with `401`");
    }

    #[test]
    fn exposes_transport_source() {
        use std::error::Error as _;

        let err = Error::from(
            reqwest::Client::new().get("not a url").build().unwrap_err(),
        );

        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("request failed: "));
    }

    #[tokio::test]
    async fn reports_unreachable_server() {
        use super::{Api as _, ListEstates};

        let api = HttpApi::new(&Config {
            base_url: "http://127.0.0.1:1".to_owned(),
            ..Config::default()
        });

        let err = api.execute(ListEstates).await.unwrap_err();

        assert!(matches!(err, Error::Transport(_)), "{err}");
        assert_eq!(err.status(), None);
    }
}
