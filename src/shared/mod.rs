pub mod audit;
pub mod config;
pub mod error;
pub mod infra;
pub mod response;
pub mod state;
