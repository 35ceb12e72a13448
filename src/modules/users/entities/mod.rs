pub mod enums;
pub mod user;
