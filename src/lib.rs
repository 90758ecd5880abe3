#![forbid(unsafe_code)]

pub mod config;
pub mod contact;
pub mod content;
pub mod email;
pub mod errors;
pub mod http;
pub mod models;

pub use config::GlobalConfig;
pub use errors::{AppError, Result};
