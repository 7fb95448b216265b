mod config;
mod models;
mod reconcile;
mod service;

pub use config::*;
pub use models::*;
pub use reconcile::*;
pub use service::*;
