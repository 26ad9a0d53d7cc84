pub mod config;
pub mod data;
pub mod format;
pub mod list_utils;
