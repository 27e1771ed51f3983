//! # ClinicBook Core
//!
//! Domain types and pure logic for clinic appointment booking: the models
//! exchanged with the backend, slot availability derivation, admin list
//! filtering and pagination, and booking form validation.
//!
//! Nothing in this crate performs I/O. Time and timezone are always passed in
//! explicitly so every derivation can be pinned in tests.

/// Slot window generation, booked index and availability derivation
pub mod availability;
/// Booking form validation and phone number formatting
pub mod booking;
/// Wall-clock sources
pub mod clock;
/// Clinic schedule configuration
pub mod config;
/// Domain error types
pub mod errors;
/// Client-side filtering and pagination for admin list views
pub mod listing;
/// Backend data models
pub mod models;
/// Request tokens for discarding out-of-order fetch results
pub mod sequence;
