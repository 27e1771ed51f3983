pub mod appointment;
pub mod user;
