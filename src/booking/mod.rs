//! Booking business rules: seat availability, booking codes, schedule overlap

mod availability;
mod code;
mod schedule;

pub use availability::*;
pub use code::*;
pub use schedule::*;
