pub mod config;
pub mod error;
pub mod expr;
pub mod interpreter;
pub mod native;
pub mod parser;
pub mod registry;
pub mod scanner;
pub mod scope;
pub mod token;
pub mod value;
