pub mod config;
pub mod id_generator;
pub mod list_merger;
pub mod ocr;
pub mod scanner;
