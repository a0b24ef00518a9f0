pub mod attribute;
pub mod expression;
pub mod table;
