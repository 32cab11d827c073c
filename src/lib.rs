pub mod address;
pub mod api;
pub mod bot;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod storage;
pub mod telegram;
pub mod utils;
pub mod validation;

pub use error::{Error, Result};
