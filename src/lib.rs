pub mod command;
pub mod common;
pub mod count;
pub mod fileformat;
pub mod runtime;
pub mod scan;
pub mod spike;
pub mod utils;
