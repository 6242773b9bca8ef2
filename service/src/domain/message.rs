//! [`ContactMessage`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{estate, user};
#[cfg(doc)]
use crate::domain::{Estate, User};

/// Message sent by a [`User`] to the owner of an [`Estate`].
#[derive(Clone, Debug)]
pub struct ContactMessage {
    /// ID of this [`ContactMessage`].
    pub id: Id,

    /// ID of the [`User`] who sent this [`ContactMessage`].
    pub sender_id: user::Id,

    /// ID of the [`Estate`] this [`ContactMessage`] is about.
    pub estate_id: estate::Id,

    /// [`Content`] of this [`ContactMessage`].
    pub content: Content,

    /// [`DateTime`] when this [`ContactMessage`] was sent.
    pub created_at: CreationDateTime,
}

/// ID of a [`ContactMessage`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Text of a [`ContactMessage`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Content(String);

impl Content {
    /// Maximum number of characters in a [`Content`].
    pub const MAX_LEN: usize = 2000;

    /// Creates a new [`Content`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        Self::check(&text).then_some(Self(text))
    }

    /// Checks whether the given `text` is a valid [`Content`].
    fn check(text: impl AsRef<str>) -> bool {
        let text = text.as_ref();
        !text.trim().is_empty() && text.chars().count() <= Self::MAX_LEN
    }
}

impl FromStr for Content {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Content`")
    }
}

/// [`DateTime`] when a [`ContactMessage`] was sent.
pub type CreationDateTime = DateTimeOf<(ContactMessage, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::Content;

    #[test]
    fn rejects_blank_content() {
        assert!(Content::new("").is_none());
        assert!(Content::new(" \n\t ").is_none());
        assert!(Content::new("Is the flat still available?").is_some());
    }

    #[test]
    fn limits_content_length() {
        assert!(Content::new("ë".repeat(Content::MAX_LEN)).is_some());
        assert!(Content::new("a".repeat(Content::MAX_LEN + 1)).is_none());
    }
}
