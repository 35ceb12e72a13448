pub mod bootstrap;
pub mod modules;
pub mod routers;
pub mod shared;
