pub mod adapters;
pub mod config;
pub mod handler;
pub mod http;
pub mod kernel;
pub mod models;
pub mod utils;
