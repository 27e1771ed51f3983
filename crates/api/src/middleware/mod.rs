pub mod error_handling;
