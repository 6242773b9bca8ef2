//! Read entities definitions.

pub mod estate;
pub mod reservation;
