pub mod config;
pub mod item;
pub mod scan_result;
