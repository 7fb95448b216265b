pub mod cloudflare;
pub mod common;
pub mod config;
pub mod discovery;
pub mod service;

pub use crate::config::{Config, MainConfig};
