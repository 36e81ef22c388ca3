pub mod batch;
pub mod config;
pub mod listen;
pub mod parse;
