//! Domain models for the cinema booking system

mod film;
mod hall;
mod price;
mod seance;
mod seat;
mod ticket;
mod user;

pub use film::*;
pub use hall::*;
pub use price::*;
pub use seance::*;
pub use seat::*;
pub use ticket::*;
pub use user::*;
