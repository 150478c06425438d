pub mod analyze;
pub mod auth_cmd;
pub mod catalog;
pub mod common;
pub mod completions;
pub mod config;
pub mod promote;
