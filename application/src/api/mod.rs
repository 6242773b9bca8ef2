//! REST API definitions.

pub mod estate;
pub mod message;
pub mod reservation;
pub mod user;

use axum::{
    extract::{FromRequest, FromRequestParts},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};

use crate::Error;

/// Creates the [`Router`] of all the REST API endpoints.
///
/// Expects a [`Service`] to be provided as an [`axum::Extension`].
///
/// [`Service`]: crate::Service
pub fn router() -> Router {
    Router::new()
        .route("/api/estates", get(estate::list).post(estate::create))
        .route("/api/estates/:id", get(estate::get))
        .route("/api/users", post(user::sign_up))
        .route("/api/users/login", post(user::log_in))
        .route("/api/users/send-email/:estate_id", post(message::send))
        .route("/api/reservation", post(reservation::create))
        .route("/api/reservation/:id", get(reservation::get))
}

/// JSON body rejected with an API [`Error`].
#[derive(Clone, Copy, Debug, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct Json<T>(pub T);

impl<T> IntoResponse for Json<T>
where
    axum::Json<T>: IntoResponse,
{
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Path parameters rejected with an API [`Error`].
#[derive(Clone, Copy, Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct Path<T>(pub T);

/// Query parameters rejected with an API [`Error`].
#[derive(Clone, Debug, Default, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct Query<T>(pub T);

#[cfg(test)]
pub(crate) mod test {
    //! Helpers for REST API tests.

    use std::time::Duration;

    use axum::{body::Body, Extension, Router};
    use http_body_util::BodyExt as _;
    use service::infra::{postgres, Postgres};
    use tower::ServiceExt as _;

    use crate::Service;

    /// Creates a [`Router`] over a [`Service`] whose database is never
    /// reachable.
    ///
    /// Suits the requests rejected before touching the database.
    pub(crate) fn router() -> Router {
        let db = postgres::Config {
            host: Some("127.0.0.1".to_owned()),
            port: Some(1),
            dbname: Some("unreachable".to_owned()),
            ..postgres::Config::default()
        };
        let config = service::Config::with_secret(
            "test-secret",
            Duration::from_secs(60),
        );
        let service = Service::new(config, Postgres::new(&db).unwrap());
        super::router().layer(Extension(service))
    }

    /// Sends the `request` to the `router` returning the response status and
    /// its JSON body.
    pub(crate) async fn call(
        router: Router,
        request: http::Request<Body>,
    ) -> (http::StatusCode, serde_json::Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    /// Builds a JSON `POST` request to the `uri`.
    pub(crate) fn post(
        uri: &str,
        token: Option<&str>,
        body: &serde_json::Value,
    ) -> http::Request<Body> {
        let mut request = http::Request::post(uri)
            .header(http::header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            request = request
                .header(http::header::AUTHORIZATION, format!("Bearer {token}"));
        }
        request.body(Body::from(body.to_string())).unwrap()
    }
}
