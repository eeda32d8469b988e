//! Seat availability computation for a seance

use std::collections::HashSet;

use crate::domain::{Seat, SeatAvailability};

/// Subtract the booked seat ids from the hall's seat list.
///
/// Booked ids that do not belong to the hall (stale tickets after a seat was
/// moved) still count toward `booked_seats` but cannot shrink the available
/// list below zero.
pub fn compute_availability(
    seance_id: i64,
    all_seats: Vec<Seat>,
    booked_seat_ids: &HashSet<i64>,
) -> SeatAvailability {
    let total_seats = all_seats.len() as i64;
    let available_seats: Vec<Seat> = all_seats
        .into_iter()
        .filter(|seat| !booked_seat_ids.contains(&seat.id))
        .collect();

    SeatAvailability {
        seance_id,
        total_seats,
        booked_seats: booked_seat_ids.len() as i64,
        available_count: available_seats.len() as i64,
        available_seats,
    }
}
