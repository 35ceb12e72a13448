pub mod addresses;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod payments;
pub mod reviews;
pub mod shipments;
pub mod users;
