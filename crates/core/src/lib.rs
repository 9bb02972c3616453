//! # Klawed Core
//!
//! Domain types and booking logic for the Klawed studio backend. Nothing in
//! this crate performs I/O directly: the appointment store is reached through
//! the [`booked::BookedSlotSource`] trait, which the database crate implements.
//!
//! - **booked**: day keys, the booking window and the booked-slot map
//! - **slots**: the slot generator that turns a day's bookings into offerable times
//! - **calendar**: whole-day unavailability (weekends and blocked dates)
//! - **validation** / **form**: form rules and the multi-step booking flow
//! - **models**: request, response and record types shared with the API

pub mod booked;
pub mod calendar;
pub mod errors;
pub mod form;
pub mod models;
pub mod slots;
pub mod validation;
