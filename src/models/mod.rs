pub mod product;
pub mod category;
