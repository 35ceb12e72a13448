pub mod enums;
pub mod order;
