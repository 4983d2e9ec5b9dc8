pub mod analyzers;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod store;
pub mod utils;
pub mod writers;

pub use crate::config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardFrame};
pub use error::{DashboardError, Result};
