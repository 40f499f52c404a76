pub mod config;
pub mod demo;
pub mod extension;
pub mod host;
pub mod listing;
