pub mod extractors;
pub mod handlers;
pub mod permissions;
pub mod router;
pub mod service;
