//! Repository structs providing database operations for each table.

pub mod confirmed_match_repo;
pub mod cycle_request_repo;
pub mod interest_repo;
pub mod session_repo;
pub mod swap_request_repo;
pub mod user_repo;

pub use confirmed_match_repo::ConfirmedMatchRepo;
pub use cycle_request_repo::CycleRequestRepo;
pub use interest_repo::InterestRepo;
pub use session_repo::SessionRepo;
pub use swap_request_repo::SwapRequestRepo;
pub use user_repo::UserRepo;
