pub mod enums;
pub mod payment;
