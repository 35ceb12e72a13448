pub mod enums;
pub mod shipment;
pub mod shipment_tracking;
