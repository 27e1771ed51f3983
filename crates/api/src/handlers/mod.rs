pub mod admin;
pub mod appointments;
pub mod availability;
