pub mod admin;
pub mod appointment;
pub mod availability;
pub mod gallery;
pub mod health;
pub mod inquiry;
pub mod newsletter;
