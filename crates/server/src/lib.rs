pub mod config;
pub mod error;
pub mod headers;
pub mod inflight;
pub mod routes;
pub mod state;
