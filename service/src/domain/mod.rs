//! Domain definitions.

pub mod estate;
pub mod message;
pub mod reservation;
pub mod user;

pub use self::{
    estate::Estate, message::ContactMessage, reservation::Reservation,
    user::User,
};
