pub mod audio;
pub mod config;
pub mod core;
pub mod storage;
pub mod terminal;
pub mod user_config;
