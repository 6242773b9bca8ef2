//! State of the estate [`DetailPage`].

use std::time::Duration;

use common::{geo, Date, Distance, PaymentMethod};
use derive_more::{Display, Error, From};
use tracing as log;
use uuid::Uuid;

use crate::{
    api::{self, Api, GetEstate, ListEstates, Reserve, SendMessage, Token},
    banner::Banner,
    model::{Estate, NewReservation, Reservation},
    Config, Gallery,
};

/// Error banner text shown when a message is submitted without a [`Token`].
pub const LOGIN_REQUIRED: &str = "Please log in to contact the owner.";

/// Error banner text shown when sending a message fails without a reason.
pub const SEND_FAILED: &str =
    "Something went wrong while sending the message.";

/// Failure text of a reservation rejected without a reason.
pub const RESERVE_FAILED: &str =
    "Something went wrong while reserving the estate.";

/// Loads the [`DetailPage`] of the [`Estate`] with the provided ID.
///
/// # Errors
///
/// - [`LoadError::NotFound`] if no [`Estate`] has the provided ID;
/// - [`LoadError::Api`] if the [`Estate`] cannot be fetched;
/// - [`LoadError::Location`] if the [`Estate`] has invalid coordinates;
/// - [`LoadError::NoPhotos`] if the [`Estate`] has no photos.
#[tracing::instrument(skip(api, config))]
pub async fn load_detail<A>(
    api: &A,
    config: &Config,
    id: Uuid,
) -> Result<DetailPage, LoadError>
where
    A: Api<GetEstate, Ok = Estate, Err = api::Error>,
{
    let estate = api.execute(GetEstate(id)).await.map_err(|e| {
        if e.is_not_found() {
            LoadError::NotFound(id)
        } else {
            LoadError::Api(e)
        }
    })?;

    let distance = estate.location()?.distance_to(&config.reference_point);
    let gallery =
        Gallery::new(estate.photos.len()).ok_or(LoadError::NoPhotos(id))?;

    Ok(DetailPage {
        gallery,
        form: MessageForm::new(config.banner_delay),
        payment_method: config.payment_method,
        estate,
        distance,
    })
}

/// Returns IDs of all the [`Estate`]s having a [`DetailPage`].
///
/// # Errors
///
/// If the [`Estate`]s cannot be listed.
pub async fn detail_paths<A>(api: &A) -> Result<Vec<Uuid>, api::Error>
where
    A: Api<ListEstates, Ok = Vec<Estate>, Err = api::Error>,
{
    Ok(api
        .execute(ListEstates)
        .await?
        .into_iter()
        .map(|e| e.id)
        .collect())
}

/// Error of [`load_detail()`].
#[derive(Debug, Display, Error, From)]
pub enum LoadError {
    /// [`Estate`] with the requested ID does not exist.
    #[display("`Estate(id: {_0})` does not exist")]
    NotFound(#[error(not(source))] Uuid),

    /// [`Api`] call failed.
    #[display("failed to fetch `Estate`: {_0}")]
    #[from]
    Api(api::Error),

    /// Fetched [`Estate`] has invalid coordinates.
    #[display("`Estate` has invalid location: {_0}")]
    #[from]
    Location(geo::InvalidError),

    /// Fetched [`Estate`] has no photos to show.
    #[display("`Estate(id: {_0})` has no photos")]
    NoPhotos(#[error(not(source))] Uuid),
}

/// Where to go after a reservation attempt.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Navigation {
    /// User must log in first.
    Login,

    /// Reservation is created and awaits payment.
    Payment {
        /// ID of the created [`Reservation`].
        reservation_id: Uuid,
    },

    /// Reservation failed, staying on the [`DetailPage`].
    Failed {
        /// Human-readable reason of the failure.
        message: String,
    },
}

/// Loaded detail view of an [`Estate`].
#[derive(Debug)]
pub struct DetailPage {
    /// Shown [`Estate`].
    estate: Estate,

    /// [`Distance`] from the reference point to the [`Estate`].
    distance: Distance,

    /// [`Gallery`] of the [`Estate`] photos.
    gallery: Gallery,

    /// Contact form of the [`Estate`] owner.
    form: MessageForm,

    /// [`PaymentMethod`] of reservations not choosing one explicitly.
    payment_method: PaymentMethod,
}

impl DetailPage {
    /// Returns the shown [`Estate`].
    #[must_use]
    pub const fn estate(&self) -> &Estate {
        &self.estate
    }

    /// Returns the [`Distance`] from the reference point to the shown
    /// [`Estate`].
    #[must_use]
    pub const fn distance(&self) -> Distance {
        self.distance
    }

    /// Returns the photo [`Gallery`].
    #[must_use]
    pub const fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// Returns the photo [`Gallery`] for navigating it.
    pub fn gallery_mut(&mut self) -> &mut Gallery {
        &mut self.gallery
    }

    /// Returns the contact [`MessageForm`].
    #[must_use]
    pub const fn form(&self) -> &MessageForm {
        &self.form
    }

    /// Returns the contact [`MessageForm`] for editing and submitting it.
    pub fn form_mut(&mut self) -> &mut MessageForm {
        &mut self.form
    }

    /// Reserves the shown [`Estate`] for the provided period.
    ///
    /// The configured [`PaymentMethod`] is used unless one is provided.
    /// No request is made without a [`Token`].
    #[tracing::instrument(
        skip(self, api, token),
        fields(estate.id = %self.estate.id),
    )]
    pub async fn reserve<A>(
        &self,
        api: &A,
        token: Option<&Token>,
        start_date: Date,
        end_date: Date,
        payment_method: Option<PaymentMethod>,
    ) -> Navigation
    where
        A: Api<Reserve, Ok = Reservation, Err = api::Error>,
    {
        let Some(token) = token else {
            return Navigation::Login;
        };

        let req = Reserve {
            token: token.clone(),
            reservation: NewReservation {
                start_date,
                end_date,
                estate_id: self.estate.id,
                payment_method: payment_method.unwrap_or(self.payment_method),
            },
        };
        match api.execute(req).await {
            Ok(r) => Navigation::Payment {
                reservation_id: r.id,
            },
            Err(e) if e.is_unauthorized() => Navigation::Login,
            Err(e) => {
                log::debug!("reservation failed: {e}");
                Navigation::Failed {
                    message: e.message().unwrap_or(RESERVE_FAILED).to_owned(),
                }
            }
        }
    }
}

/// Contact form sending a message to an [`Estate`] owner.
#[derive(Debug)]
pub struct MessageForm {
    /// Typed message text.
    input: String,

    /// [`Banner`] reporting a sent message.
    success: Banner,

    /// [`Banner`] reporting a failure.
    error: Banner,

    /// Delay after which a shown [`Banner`] clears itself.
    delay: Duration,
}

impl MessageForm {
    /// Creates a new empty [`MessageForm`] with [`Banner`]s clearing after
    /// the provided `delay`.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            input: String::new(),
            success: Banner::default(),
            error: Banner::default(),
            delay,
        }
    }

    /// Returns the typed message text.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replaces the typed message text.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Returns the shown success text, if any.
    #[must_use]
    pub fn success(&self) -> Option<String> {
        self.success.text()
    }

    /// Returns the shown error text, if any.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.error.text()
    }

    /// Sends the typed message about the [`Estate`] with the provided ID.
    ///
    /// Both [`Banner`]s are cleared first. The input is cleared only once
    /// the message is sent. Without a [`Token`] no request is made.
    #[tracing::instrument(skip(self, api, token))]
    pub async fn submit<A>(
        &mut self,
        api: &A,
        token: Option<&Token>,
        estate_id: Uuid,
    ) where
        A: Api<SendMessage, Ok = String, Err = api::Error>,
    {
        self.success.clear();
        self.error.clear();

        let Some(token) = token else {
            self.error.show(LOGIN_REQUIRED, self.delay);
            return;
        };

        let req = SendMessage {
            token: token.clone(),
            estate_id,
            message: self.input.clone(),
        };
        match api.execute(req).await {
            Ok(status) => {
                self.success.show(status, self.delay);
                self.input.clear();
            }
            Err(e) => {
                log::debug!("sending message failed: {e}");
                let text = e.message().unwrap_or(SEND_FAILED).to_owned();
                self.error.show(text, self.delay);
            }
        }
    }
}
