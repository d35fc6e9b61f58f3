pub mod config;
pub mod error;
pub mod indicator;
pub mod model;
pub mod monitor;
pub mod provider;
pub mod ui;
