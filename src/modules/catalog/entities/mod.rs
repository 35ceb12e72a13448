pub mod category;
pub mod product;
pub mod sub_category;
