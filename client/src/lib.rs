//! Client-side logic of the estate catalog and detail views.
//!
//! Covers the data contract of the views, not their rendering: the typed
//! REST [`api`], the [`catalog`] city filter, the photo [`gallery`], the
//! self-clearing [`banner`]s and the detail [`page`] state.

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod api;
pub mod banner;
pub mod catalog;
pub mod config;
pub mod gallery;
pub mod model;
pub mod page;

pub use self::{
    api::{Api, HttpApi, Token},
    catalog::Catalog,
    config::Config,
    gallery::Gallery,
    page::{detail_paths, load_detail, DetailPage, LoadError, Navigation},
};
