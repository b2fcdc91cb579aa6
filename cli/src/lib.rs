pub mod args;
pub mod table;
