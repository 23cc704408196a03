pub mod auth;
pub mod cycle_requests;
pub mod matches;
pub mod swap_requests;
pub mod user;
