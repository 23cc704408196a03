use std::sync::Arc;

use crate::config::ServerConfig;
use crate::engine::SwapEngine;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: roomswap_db::DbPool,
    /// Server configuration, including the swap policy.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// A swap engine bound to this state's pool and policy.
    pub fn engine(&self) -> SwapEngine {
        SwapEngine::new(self.pool.clone(), self.config.policy)
    }
}
