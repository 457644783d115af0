pub mod account;
pub mod backend;
pub mod booking;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod notify;
pub mod ui;

pub use error::{AppError, Result};
