pub mod pdf;
pub mod table;
