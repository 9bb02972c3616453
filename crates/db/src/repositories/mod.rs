pub mod appointment;
pub mod gallery;
pub mod inquiry;
pub mod newsletter;
