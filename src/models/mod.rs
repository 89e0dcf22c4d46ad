pub mod category;
pub mod piece;
