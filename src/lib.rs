// src/lib.rs
pub mod alert;
pub mod checker;
pub mod config;
pub mod error;
pub mod git;
pub mod logger;
pub mod monitor;
pub mod time;

pub use error::MonitorError;
