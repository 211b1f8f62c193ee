//! # Barbershop Core
//!
//! Domain types and pure computations for the barbershop booking service.
//!
//! - [`availability`]: bookable slot computation for a barber's shift
//! - [`time`]: 12h/24h clock conversion and minute-of-day parsing
//! - [`auth`]: bearer-token expiry gate and user claims
//! - [`credentials`]: injectable token storage with legacy migration
//! - [`booking`]: booking view-state reducer
//! - [`cart`]: product cart arithmetic and order message
//!
//! Nothing in this crate performs I/O. Inputs arrive from the upstream
//! backend through `barbershop-backend` as the wire [`models`].

pub mod auth;
pub mod availability;
pub mod booking;
pub mod cart;
pub mod credentials;
pub mod errors;
pub mod models;
pub mod time;

pub use availability::{
    compute_available_slots, reschedule_slots, validate_booking, SlotLabel, WorkShift,
};
pub use errors::{BookingError, BookingResult};
pub use time::{to_12h, to_24h};
