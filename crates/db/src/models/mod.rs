//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Create DTOs for inserts where the insert is not fully described by a
//!   validated core type
//! - Conversions into the core domain types the engines consume

pub mod confirmed_match;
pub mod cycle_request;
pub mod interest;
pub mod session;
pub mod swap_request;
pub mod user;
