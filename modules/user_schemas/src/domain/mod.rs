pub mod reader;
pub mod rules;
pub mod validate;
