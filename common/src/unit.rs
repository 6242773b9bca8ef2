//! Marker types distinguishing [`DateTimeOf`] kinds.
//!
//! [`DateTimeOf`]: crate::DateTimeOf

/// Marker of the moment an entity was created.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker of the moment an entity was last updated.
#[derive(Clone, Copy, Debug)]
pub struct Update;
